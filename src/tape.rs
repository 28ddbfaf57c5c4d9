//! This module implements the fixed-length tape of the Turing Machine: a bounded
//! vector of symbols with a single head whose movement is clamped at both ends.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Symbol, TAPE_DELIMITER};

/// A fixed-length tape with a single read/write head.
///
/// The tape never grows. Moving the head past either end is a silent no-op,
/// so the head index is always valid while the tape is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tape {
    cells: Vec<Symbol>,
    head: usize,
}

impl Tape {
    /// Creates a tape from the given cells, with the head at index 0.
    pub fn new(cells: Vec<Symbol>) -> Self {
        Tape { cells, head: 0 }
    }

    /// Creates a tape of `len` blank cells, with the head at index 0.
    pub fn blank(len: usize) -> Self {
        Tape {
            cells: vec![Symbol::blank(); len],
            head: 0,
        }
    }

    /// Returns the number of cells on the tape.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Checks whether the tape has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the current head position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns all cells in order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.cells
    }

    /// Returns the symbol under the head, or `None` on an empty tape.
    pub fn read(&self) -> Option<&Symbol> {
        self.cells.get(self.head)
    }

    /// Writes a symbol at the head position. Does nothing on an empty tape.
    pub fn write(&mut self, symbol: Symbol) {
        if let Some(cell) = self.cells.get_mut(self.head) {
            *cell = symbol;
        }
    }

    /// Writes the blank symbol at the head position.
    pub fn erase(&mut self) {
        self.write(Symbol::blank());
    }

    /// Moves the head one cell to the right, staying put at the last cell.
    pub fn move_right(&mut self) {
        if self.head + 1 < self.cells.len() {
            self.head += 1;
        }
    }

    /// Moves the head one cell to the left, staying put at the first cell.
    pub fn move_left(&mut self) {
        if self.head > 0 {
            self.head -= 1;
        }
    }
}

impl fmt::Display for Tape {
    /// Renders every cell followed by the tape delimiter, e.g. `0| ε| 1| `.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}{}", cell, TAPE_DELIMITER)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_tape() {
        let tape = Tape::blank(4);

        assert_eq!(tape.len(), 4);
        assert_eq!(tape.head(), 0);
        assert!(tape.symbols().iter().all(|s| s.is_blank()));
    }

    #[test]
    fn test_write_and_erase() {
        let mut tape = Tape::blank(3);

        tape.write(Symbol::from("1"));
        assert_eq!(tape.read(), Some(&Symbol::from("1")));

        tape.erase();
        assert_eq!(tape.read(), Some(&Symbol::blank()));
    }

    #[test]
    fn test_head_clamps_at_right_end() {
        let mut tape = Tape::blank(3);

        for _ in 0..5 {
            tape.move_right();
        }

        assert_eq!(tape.head(), 2);
    }

    #[test]
    fn test_head_clamps_at_left_end() {
        let mut tape = Tape::blank(3);

        tape.move_left();
        assert_eq!(tape.head(), 0);

        tape.move_right();
        tape.move_left();
        tape.move_left();
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn test_empty_tape_is_inert() {
        let mut tape = Tape::blank(0);

        assert!(tape.is_empty());
        assert_eq!(tape.read(), None);

        tape.write(Symbol::from("1"));
        tape.erase();
        tape.move_right();
        tape.move_left();

        assert_eq!(tape.head(), 0);
        assert!(tape.is_empty());
    }

    #[test]
    fn test_display_format() {
        let tape = Tape::new(vec![
            Symbol::from("0"),
            Symbol::blank(),
            Symbol::from("1"),
        ]);

        assert_eq!(tape.to_string(), "0| ε| 1| ");
    }
}
