use crate::parser::parse_rules;
use crate::types::{Program, Symbol, TuringMachineError};

use std::sync::RwLock;

/// An embedded program definition: a blank tape of a fixed width, the
/// configuration list, the rule lines, and the demo iteration budget.
struct ProgramDef {
    name: &'static str,
    tape_cells: usize,
    configurations: &'static [&'static str],
    rules: &'static [&'static str],
    iterations: usize,
}

// Default embedded programs
const PROGRAM_DEFS: [ProgramDef; 6] = [
    ProgramDef {
        name: "Alternating zeros and ones",
        tape_cells: 20,
        configurations: &["A", "B", "C", "D"],
        rules: &["A|ε|P0,R|B", "B|ε|R|C", "C|ε|P1,R|D", "D|ε|R|A"],
        iterations: 20,
    },
    ProgramDef {
        name: "Alternating zeros and ones (compact)",
        tape_cells: 20,
        configurations: &["B"],
        rules: &["B|ε|P0|B", "B|0|R,R,P1|B", "B|1|R,R,P0|B"],
        iterations: 20,
    },
    ProgramDef {
        name: "Alternating zeros and ones (wide)",
        tape_cells: 100,
        configurations: &["A", "B", "C", "D"],
        rules: &["A|ε|P0,R|B", "B|ε|R|C", "C|ε|P1,R|D", "D|ε|R|A"],
        iterations: 100,
    },
    ProgramDef {
        name: "Single one",
        tape_cells: 20,
        configurations: &["B", "C", "D", "E", "F"],
        rules: &[
            "B|ε|P0,R|C",
            "C|ε|R|D",
            "D|ε|P1,R|E",
            "E|ε|R|F",
            "F|ε|P0,R|E",
        ],
        iterations: 20,
    },
    ProgramDef {
        name: "Transcendental number",
        tape_cells: 100,
        configurations: &["B", "O", "Q", "P", "F"],
        rules: &[
            "B|ε|Pə,R,Pə,R,P0,R,R,P0,L,L|O",
            "O|1|R,Px,L,L,L|O",
            "O|0||Q",
            "Q|1|R,R|Q",
            "Q|0|R,R|Q",
            "Q|ε|P1,L|P",
            "P|x|E,R|Q",
            "P|ə|R|F",
            "P|ε|L,L|P",
            "F|1|R,R|F",
            "F|0|R,R|F",
            "F|ε|P0,L,L|O",
        ],
        iterations: 100,
    },
    ProgramDef {
        name: "Successive integers",
        tape_cells: 20,
        configurations: &["BEGIN", "INCREMENT", "REWIND1", "REWIND2"],
        rules: &[
            "BEGIN|ε|P0|INCREMENT",
            "INCREMENT|0|P1|REWIND1",
            "INCREMENT|1,0|N|REWIND2",
            "INCREMENT|1|P0,L|INCREMENT",
            "INCREMENT|ε|P1|REWIND1",
            "REWIND1|ε|L|INCREMENT",
            "REWIND1|0|R|REWIND1",
            "REWIND1|1|R|REWIND1",
            "REWIND2|ε|P1|INCREMENT",
            "REWIND2|0|R|REWIND2",
            "REWIND2|1|R|REWIND2",
        ],
        iterations: 3100,
    },
];

impl ProgramDef {
    fn to_program(&self) -> Result<Program, TuringMachineError> {
        Ok(Program {
            name: self.name.to_string(),
            tape: vec![Symbol::blank(); self.tape_cells],
            configurations: self.configurations.iter().map(|s| s.to_string()).collect(),
            rules: parse_rules(self.rules)?,
            iterations: self.iterations,
        })
    }
}

lazy_static::lazy_static! {
    pub static ref PROGRAMS: RwLock<Vec<Program>> = RwLock::new(Vec::new());
}

pub struct ProgramManager;

impl ProgramManager {
    /// Initialize the registry with the embedded programs
    pub fn load() -> Result<(), TuringMachineError> {
        let mut programs = Vec::new();

        for def in &PROGRAM_DEFS {
            match def.to_program() {
                Ok(program) => programs.push(program),
                Err(e) => eprintln!("Failed to parse program '{}': {}", def.name, e),
            }
        }

        if let Ok(mut write_guard) = PROGRAMS.write() {
            *write_guard = programs;
        } else {
            return Err(TuringMachineError::ProgramError(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        // Populate the registry if not already populated
        let _ = Self::load();

        PROGRAMS.read().map(|programs| programs.len()).unwrap_or(0)
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        // Populate the registry if not already populated
        let _ = Self::load();

        PROGRAMS
            .read()
            .map_err(|_| {
                TuringMachineError::ProgramError("Failed to acquire read lock".to_string())
            })?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                TuringMachineError::ProgramError(format!("Program index {} out of range", index))
            })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        // Populate the registry if not already populated
        let _ = Self::load();

        PROGRAMS
            .read()
            .map_err(|_| {
                TuringMachineError::ProgramError("Failed to acquire read lock".to_string())
            })?
            .iter()
            .find(|program| program.name == name)
            .cloned()
            .ok_or_else(|| {
                TuringMachineError::ProgramError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        // Populate the registry if not already populated
        let _ = Self::load();

        PROGRAMS
            .read()
            .map(|programs| {
                programs
                    .iter()
                    .map(|program| program.name.clone())
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            initial_configuration: program.configurations.first().cloned().unwrap_or_default(),
            tape_cells: program.tape.len(),
            configuration_count: program.configurations.len(),
            rule_count: program.rules.len(),
            iterations: program.iterations,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_configuration: String,
    pub tape_cells: usize,
    pub configuration_count: usize,
    pub rule_count: usize,
    pub iterations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::TuringMachine;

    #[test]
    fn test_program_manager_initialization() {
        let result = ProgramManager::load();
        assert!(result.is_ok());

        assert_eq!(ProgramManager::get_program_count(), 6);
    }

    #[test]
    fn test_program_names() {
        let names = ProgramManager::list_program_names();

        assert!(names.contains(&"Alternating zeros and ones".to_string()));
        assert!(names.contains(&"Single one".to_string()));
        assert!(names.contains(&"Transcendental number".to_string()));
        assert!(names.contains(&"Successive integers".to_string()));
    }

    #[test]
    fn test_program_manager_get_program_by_index() {
        let program = ProgramManager::get_program_by_index(0);
        assert!(program.is_ok());

        let result = ProgramManager::get_program_by_index(999);
        assert!(result.is_err());
    }

    #[test]
    fn test_program_manager_get_program_by_name() {
        let program = ProgramManager::get_program_by_name("Successive integers").unwrap();
        assert_eq!(program.configurations[0], "BEGIN");
        assert_eq!(program.rules.len(), 11);
        assert_eq!(program.iterations, 3100);

        let result = ProgramManager::get_program_by_name("Nonexistent");
        assert!(result.is_err());
    }

    #[test]
    fn test_program_manager_get_program_info() {
        let info = ProgramManager::get_program_info(5).unwrap();

        assert_eq!(info.index, 5);
        assert_eq!(info.name, "Successive integers");
        assert_eq!(info.initial_configuration, "BEGIN");
        assert_eq!(info.tape_cells, 20);
        assert_eq!(info.configuration_count, 4);
        assert_eq!(info.rule_count, 11);
        assert_eq!(info.iterations, 3100);

        let result = ProgramManager::get_program_info(999);
        assert!(result.is_err());
    }

    #[test]
    fn test_all_programs_execute_their_budget() {
        let count = ProgramManager::get_program_count();

        for i in 0..count {
            let program = ProgramManager::get_program_by_index(i).unwrap();
            let mut machine = TuringMachine::from(&program);

            let result = machine.run(program.iterations);
            assert!(result.is_ok(), "Program '{}' failed to run", program.name);
            assert!(
                machine.tape().head() < program.tape.len(),
                "Program '{}' moved the head out of bounds",
                program.name
            );
        }
    }

    #[test]
    fn test_single_one_program_output() {
        let program = ProgramManager::get_program_by_name("Single one").unwrap();
        let mut machine = TuringMachine::from(&program);

        machine.run(program.iterations).unwrap();

        let ones = machine
            .tape()
            .symbols()
            .iter()
            .filter(|s| s.as_str() == "1")
            .count();
        assert_eq!(ones, 1);
        assert_eq!(machine.tape().symbols()[0], "0");
        assert_eq!(machine.tape().symbols()[2], "1");
        assert_eq!(machine.configuration(), Some("F"));
    }

    #[test]
    fn test_transcendental_program_output() {
        let program = ProgramManager::get_program_by_name("Transcendental number").unwrap();
        let mut machine = TuringMachine::from(&program);

        machine.run(program.iterations).unwrap();
        let symbols = machine.tape().symbols();

        // The two sentinel squares are printed once and never touched again.
        assert_eq!(symbols[0], "ə");
        assert_eq!(symbols[1], "ə");

        // Digits land on even squares; the sequence opens 0, 0, 1, 0, 1, 1.
        let digits: Vec<&str> = [2, 4, 6, 8, 10, 12]
            .iter()
            .map(|&i| symbols[i].as_str())
            .collect();
        assert_eq!(digits, vec!["0", "0", "1", "0", "1", "1"]);

        // Odd squares hold only bookkeeping marks or blanks.
        assert!(symbols
            .iter()
            .skip(3)
            .step_by(2)
            .all(|s| matches!(s.as_str(), "x" | "ε")));
    }

    #[test]
    fn test_compact_program_clamps_at_the_edge() {
        let program =
            ProgramManager::get_program_by_name("Alternating zeros and ones (compact)").unwrap();
        let mut machine = TuringMachine::from(&program);

        machine.run(program.iterations).unwrap();
        let symbols = machine.tape().symbols();

        // Even squares alternate; once the double right move starts clamping,
        // the machine rewrites the last cell in place instead of running off.
        for k in 0..10 {
            let expected = if k % 2 == 0 { "0" } else { "1" };
            assert_eq!(symbols[2 * k], expected);
        }
        for k in 0..9 {
            assert!(symbols[2 * k + 1].is_blank());
        }
        assert_eq!(symbols[19], "1");
        assert_eq!(machine.tape().head(), 19);
    }
}
