//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator: tape symbols, the typed rule representation, machine definitions, execution
//! outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The reserved symbol token denoting an empty tape cell.
pub const BLANK_SYMBOL: &str = "ε";
/// The reserved symbol-spec token that matches any symbol under the head.
pub const WILDCARD_TOKEN: &str = "ANY";
/// Separates the four fields of a rule's textual encoding.
pub const RULE_DELIMITER: char = '|';
/// Separates operations (and the position qualifier) within a rule field.
pub const OPERATION_DELIMITER: char = ',';
/// Follows every symbol when a tape is rendered as a single line.
pub const TAPE_DELIMITER: &str = "| ";

/// A single tape symbol: an opaque printable token.
///
/// A symbol is not necessarily one character wide: the blank `ε` and the
/// bookkeeping marker `ə` used by some programs are multi-byte tokens.
/// Symbols compare by exact token equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol from any string-like token.
    pub fn new(token: impl Into<String>) -> Self {
        Symbol(token.into())
    }

    /// Returns the reserved blank symbol.
    pub fn blank() -> Self {
        Symbol::new(BLANK_SYMBOL)
    }

    /// Checks whether this symbol is the reserved blank.
    pub fn is_blank(&self) -> bool {
        self.0 == BLANK_SYMBOL
    }

    /// Returns the symbol's token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(token: &str) -> Self {
        Symbol::new(token)
    }
}

impl From<String> for Symbol {
    fn from(token: String) -> Self {
        Symbol::new(token)
    }
}

impl From<char> for Symbol {
    fn from(token: char) -> Self {
        Symbol::new(token)
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// The matching pattern on a rule: a concrete symbol, a concrete symbol
/// pinned to one head position, or the wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolSpec {
    /// Matches when the symbol under the head equals this symbol.
    Plain(Symbol),
    /// Matches when the symbol under the head equals this symbol and the
    /// head is at exactly this index. Encoded textually as `symbol,index`.
    AtIndex(Symbol, usize),
    /// Matches any symbol. Encoded textually as the `ANY` token.
    Any,
}

/// A single operation of a rule's operation sequence, applied at the head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Write the given symbol at the head position.
    Print(Symbol),
    /// Write the blank symbol at the head position.
    Erase,
    /// Move the head one cell to the right, clamped to the last valid index.
    Right,
    /// Move the head one cell to the left, clamped to index 0.
    Left,
    /// Do nothing.
    Nop,
    /// An unrecognized opcode. Executing it has no effect on the machine;
    /// a tracer diagnostic is emitted instead.
    Unknown(char),
}

/// Represents a single transition rule of the machine.
///
/// Under `configuration`, when `symbol` matches the tape, the engine applies
/// `operations` in order and switches to the `next` configuration. Rules live
/// in one ordered table and the order is load-bearing: exact matches resolve
/// by first occurrence, wildcard matches by last occurrence (see
/// `TuringMachine::resolve`). Duplicate or contradictory rules are permitted
/// and disambiguated purely by table position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// The configuration this rule applies under.
    pub configuration: String,
    /// The pattern matched against the symbol under the head.
    pub symbol: SymbolSpec,
    /// The operations applied, left to right, within one cycle.
    /// May be empty, making the cycle a pure configuration change.
    pub operations: Vec<Operation>,
    /// The configuration the machine transitions to after the operations.
    pub next: String,
}

/// Represents the outcome of a single execution cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A rule was resolved and its operations were applied.
    Applied,
    /// No rule matched; the tape and configuration are unchanged.
    NoRule,
}

/// Represents a complete machine definition: initial tape, configuration
/// list, rule table, and the iteration budget a run of it should be given.
///
/// The engine has no halt detection, so the budget is part of the definition
/// rather than a property of the run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Program {
    /// The name of the program.
    pub name: String,
    /// The initial tape contents.
    pub tape: Vec<Symbol>,
    /// All configuration names; the first entry seeds the initial configuration.
    pub configurations: Vec<String>,
    /// The ordered rule table.
    pub rules: Vec<Rule>,
    /// The number of cycles a run of this program should execute.
    pub iterations: usize,
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// Indicates an error during the parsing of a textual rule encoding.
    #[error("Rule parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<crate::parser::Rule>>),
    /// Indicates that a rule cannot be represented in the textual encoding.
    #[error("Rule encoding error: {0}")]
    EncodeError(String),
    /// Indicates that a run was requested on a machine with no configurations.
    #[error("No machine configurations defined")]
    EmptyConfigurations,
    /// Indicates a failed lookup in the embedded program registry.
    #[error("Program error: {0}")]
    ProgramError(String),
}
