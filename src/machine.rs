//! This module defines the `TuringMachine` struct, which simulates the behavior of a
//! single-tape Turing Machine. It handles rule resolution, operation execution, head
//! movement, and configuration transitions.

use crate::tape::Tape;
use crate::trace::{NopTracer, Tracer};
use crate::types::{Operation, Program, Rule, Step, SymbolSpec, TuringMachineError};

/// Represents a single-tape Turing Machine.
///
/// The machine owns its tape, its ordered rule table, and the name of the
/// current configuration. The rule table is immutable after construction;
/// all mutable state (tape, head, configuration) is exclusively owned, so
/// independent machines may run in parallel threads without synchronization.
pub struct TuringMachine {
    tape: Tape,
    configurations: Vec<String>,
    configuration: Option<String>,
    rules: Vec<Rule>,
    tracer: Box<dyn Tracer>,
    cycle_count: usize,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` from a tape, a configuration list, and
    /// an ordered rule table.
    ///
    /// All three are stored without validation. The first configuration, if
    /// any, becomes the current one. Diagnostics are discarded until a
    /// tracer is installed with `with_tracer`.
    ///
    /// # Arguments
    ///
    /// * `tape` - The initial tape.
    /// * `configurations` - All configuration names; the first seeds the machine.
    /// * `rules` - The rule table, in resolution order.
    pub fn new(tape: Tape, configurations: Vec<String>, rules: Vec<Rule>) -> Self {
        Self {
            tape,
            configuration: configurations.first().cloned(),
            configurations,
            rules,
            tracer: Box::new(NopTracer),
            cycle_count: 0,
        }
    }

    /// Replaces the machine's tracer, returning the machine for chaining.
    pub fn with_tracer(mut self, tracer: Box<dyn Tracer>) -> Self {
        self.tracer = tracer;
        self
    }

    /// Resolves the rule applicable to the current configuration, the symbol
    /// under the head, and the head position.
    ///
    /// The table is scanned once in order. A position-exact or plain-exact
    /// match ends the scan immediately, so the first exact rule wins. A
    /// wildcard match is remembered and the scan continues, so the last
    /// wildcard rule wins, and only when no exact rule matched at all.
    ///
    /// # Returns
    ///
    /// * `Some(&Rule)` if a rule matches this cycle.
    /// * `None` if no rule matches, or the tape is empty, or the machine has
    ///   no current configuration.
    pub fn resolve(&self) -> Option<&Rule> {
        self.resolve_index().map(|idx| &self.rules[idx])
    }

    fn resolve_index(&self) -> Option<usize> {
        let configuration = self.configuration.as_deref()?;
        let symbol = self.tape.read()?;
        let head = self.tape.head();

        let mut wildcard = None;

        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.configuration != configuration {
                continue;
            }

            match &rule.symbol {
                SymbolSpec::AtIndex(s, i) if s == symbol && *i == head => return Some(idx),
                SymbolSpec::Plain(s) if s == symbol => return Some(idx),
                SymbolSpec::Any => wildcard = Some(idx),
                _ => {}
            }
        }

        wildcard
    }

    /// Executes a single cycle of the machine's computation.
    ///
    /// Resolves a rule, applies its operations in order against the tape,
    /// and transitions to the rule's target configuration. A cycle with no
    /// matching rule mutates nothing; repeated no-rule cycles are stable
    /// no-ops and serve as the machine's de facto halting behavior.
    ///
    /// # Returns
    ///
    /// * `Step::Applied` if a rule was resolved and executed.
    /// * `Step::NoRule` if no rule matched this cycle.
    pub fn step(&mut self) -> Step {
        self.cycle_count += 1;

        let Some(idx) = self.resolve_index() else {
            self.tracer.cycle(None, self.tape.head());
            return Step::NoRule;
        };

        self.tracer.cycle(Some(&self.rules[idx]), self.tape.head());

        for operation in &self.rules[idx].operations {
            self.tracer.operation(operation, self.tape.head());

            match operation {
                Operation::Print(symbol) => self.tape.write(symbol.clone()),
                Operation::Erase => self.tape.erase(),
                Operation::Right => self.tape.move_right(),
                Operation::Left => self.tape.move_left(),
                Operation::Nop | Operation::Unknown(_) => {}
            }
        }

        let next = self.rules[idx].next.clone();
        if let Some(from) = self.configuration.as_deref() {
            self.tracer.transition(from, &next);
        }
        self.configuration = Some(next);

        Step::Applied
    }

    /// Runs the machine for exactly `max_iterations` cycles.
    ///
    /// The current configuration is first seeded from the first entry of the
    /// configuration list, then every cycle executes unconditionally; there
    /// is no early exit. The tape is not reset, so consecutive runs continue
    /// from the tape the previous run produced.
    ///
    /// # Arguments
    ///
    /// * `max_iterations` - The exact number of cycles to execute.
    ///
    /// # Returns
    ///
    /// * `Ok(&Tape)` - The final tape after all cycles ran.
    /// * `Err(TuringMachineError::EmptyConfigurations)` if the configuration
    ///   list is empty and the machine cannot be seeded.
    pub fn run(&mut self, max_iterations: usize) -> Result<&Tape, TuringMachineError> {
        let initial = self
            .configurations
            .first()
            .cloned()
            .ok_or(TuringMachineError::EmptyConfigurations)?;

        self.configuration = Some(initial);

        for _ in 0..max_iterations {
            self.step();
        }

        Ok(&self.tape)
    }

    /// Returns the machine's tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the current configuration name, if the machine has one.
    pub fn configuration(&self) -> Option<&str> {
        self.configuration.as_deref()
    }

    /// Returns all configuration names supplied at construction.
    pub fn configurations(&self) -> &[String] {
        &self.configurations
    }

    /// Returns the ordered rule table.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the total number of cycles executed, including no-rule cycles.
    pub fn cycles(&self) -> usize {
        self.cycle_count
    }
}

impl From<&Program> for TuringMachine {
    /// Builds a machine from a program definition with the default tracer.
    fn from(program: &Program) -> Self {
        TuringMachine::new(
            Tape::new(program.tape.clone()),
            program.configurations.clone(),
            program.rules.clone(),
        )
    }
}
