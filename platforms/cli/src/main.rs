use clap::Parser;
use std::io::{self, Read};
use turmac::machine::TuringMachine;
use turmac::programs::ProgramManager;
use turmac::tape::Tape;
use turmac::trace::StderrTracer;
use turmac::{parse_rules, Program, TuringMachineError};

/// A single-tape Turing Machine interpreter.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  turmac-cli --list
  turmac-cli --program 'Successive integers' --debug
  turmac-cli --rule 'A|ε|P0,R|B' --rule 'B|ε|R|A' --configurations A,B --iterations 20
  cat rules.txt | turmac-cli --configurations A,B,C,D --iterations 20")]
struct Cli {
    /// Name or index of an embedded program to execute
    #[clap(short, long)]
    program: Option<String>,

    /// A rule line in the textual notation; repeat for more rules.
    /// Rules can also be piped via stdin, one per line
    #[clap(short, long = "rule")]
    rules: Vec<String>,

    /// Comma-separated configuration names; the first seeds the machine
    #[clap(short, long)]
    configurations: Option<String>,

    /// Number of blank cells on the tape
    #[clap(short, long, default_value_t = 20)]
    tape: usize,

    /// Number of cycles to execute (defaults to the embedded program's
    /// budget, or to the tape length for ad-hoc rules)
    #[clap(short, long)]
    iterations: Option<usize>,

    /// List the embedded programs
    #[clap(short, long)]
    list: bool,

    /// Narrate each cycle of the execution on stderr
    #[clap(short = 'd', long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.list {
        list_programs();
        return;
    }

    if let Some(selector) = &cli.program {
        run_embedded(selector, &cli);
    } else {
        run_ad_hoc(&cli);
    }
}

/// Prints one line per embedded program.
fn list_programs() {
    let count = ProgramManager::get_program_count();

    for index in 0..count {
        match ProgramManager::get_program_info(index) {
            Ok(info) => println!(
                "{:>2}  {:<40} {:>3} cells, {} configurations, {:>2} rules, {} iterations",
                info.index,
                info.name,
                info.tape_cells,
                info.configuration_count,
                info.rule_count,
                info.iterations
            ),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

/// Runs an embedded program selected by index or by name.
fn run_embedded(selector: &str, cli: &Cli) {
    let program = match lookup_program(selector) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let iterations = cli.iterations.unwrap_or(program.iterations);
    execute(TuringMachine::from(&program), iterations, cli.debug);
}

/// Runs a machine assembled from command-line rules and piped stdin.
fn run_ad_hoc(cli: &Cli) {
    let mut lines = cli.rules.clone();

    if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buffer) {
            eprintln!("Failed to read from stdin: {}", e);
            std::process::exit(1);
        }

        lines.extend(
            buffer
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    let rules = match parse_rules(&lines) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let configurations: Vec<String> = cli
        .configurations
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    let iterations = cli.iterations.unwrap_or(cli.tape);
    let machine = TuringMachine::new(Tape::blank(cli.tape), configurations, rules);
    execute(machine, iterations, cli.debug);
}

/// Resolves a selector against the embedded program registry. A selector
/// that parses as a number is treated as an index, anything else as a name.
fn lookup_program(selector: &str) -> Result<Program, TuringMachineError> {
    match selector.parse::<usize>() {
        Ok(index) => ProgramManager::get_program_by_index(index),
        Err(_) => ProgramManager::get_program_by_name(selector),
    }
}

/// Runs the machine for the given budget and prints the final tape.
fn execute(mut machine: TuringMachine, iterations: usize, debug: bool) {
    if debug {
        machine = machine.with_tracer(Box::new(StderrTracer));
    }

    match machine.run(iterations) {
        Ok(tape) => println!("{}", tape),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
