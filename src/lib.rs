//! This crate provides the core logic for a single-tape Turing Machine simulator.
//! It includes modules for parsing the textual rule notation, resolving and executing
//! rules against a bounded tape, tracing execution, and managing a collection of
//! predefined programs.

pub mod encoder;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod tape;
pub mod trace;
pub mod types;

/// Re-exports the encoding functions from the encoder module.
pub use encoder::{encode_rule, encode_rules};
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the parsing functions from the parser module.
pub use parser::{parse_rule, parse_rules};
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the tracing trait and its stock implementations from the trace module.
pub use trace::{NopTracer, StderrTracer, Tracer};
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Operation, Program, Rule, Step, Symbol, SymbolSpec, TuringMachineError, BLANK_SYMBOL,
    WILDCARD_TOKEN,
};
