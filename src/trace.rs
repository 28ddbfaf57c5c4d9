//! This module provides the tracing seam for the execution engine. Diagnostics are an
//! injected capability rather than a global flag: the machine publishes typed events to
//! a `Tracer` chosen at construction, and the default tracer discards everything.

use crate::types::{Operation, Rule};

/// Receives execution events from a running machine.
///
/// All methods have empty default bodies, so an implementation only has to
/// override the events it cares about. The `Send` bound keeps machines
/// movable across threads together with their tracer.
pub trait Tracer: Send {
    /// Called at the start of every cycle with the resolved rule, if any,
    /// and the current head position.
    fn cycle(&mut self, _resolved: Option<&Rule>, _head: usize) {}

    /// Called before each operation of the resolved rule is applied.
    fn operation(&mut self, _operation: &Operation, _head: usize) {}

    /// Called after a rule's operations ran, with the configuration change.
    fn transition(&mut self, _from: &str, _to: &str) {}
}

/// A tracer that discards every event. The default for new machines.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopTracer;

impl Tracer for NopTracer {}

/// A tracer that narrates execution on stderr, one line per event.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrTracer;

impl Tracer for StderrTracer {
    fn cycle(&mut self, resolved: Option<&Rule>, head: usize) {
        eprintln!("--------------------------------------------");
        match resolved {
            Some(rule) => eprintln!("new cycle at {head}, resolved rule: {rule:?}"),
            None => eprintln!("new cycle at {head}, no rule resolved"),
        }
    }

    fn operation(&mut self, operation: &Operation, head: usize) {
        match operation {
            Operation::Print(symbol) => eprintln!("printing {symbol} at {head}"),
            Operation::Right => eprintln!("moving right at {head}"),
            Operation::Left => eprintln!("moving left at {head}"),
            Operation::Unknown(c) => eprintln!("unrecognized operation: {c}"),
            _ => {} // Erase and Nop run silently
        }
    }

    fn transition(&mut self, from: &str, to: &str) {
        eprintln!("configuration: {from} -> {to}");
    }
}
