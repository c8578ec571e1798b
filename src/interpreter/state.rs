//! Mutable program state threaded through execution

use crate::errors::Diagnostic;
use crate::memory::value::Cell;
use crate::memory::Memory;
use crate::parser::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;

/// The single mutable record of a run.
///
/// Created once before execution with zeroed memory, mutated by every
/// instruction, and handed back as the interpreter's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramState {
    pub memory: Memory,
    /// Index of the active cell; always inside `memory` when memory is non-empty
    pub pointer: usize,
    pub errors: Vec<Diagnostic>,
    /// Program counter: the next instruction to execute
    pub next_index: usize,
    /// Label name -> index of its declaration
    pub goto_labels: FxHashMap<String, usize>,
}

impl ProgramState {
    pub fn new(memory_size: usize) -> Self {
        ProgramState {
            memory: Memory::new(memory_size),
            pointer: 0,
            errors: Vec::new(),
            next_index: 0,
            goto_labels: FxHashMap::default(),
        }
    }

    /// The active cell, if the memory has one
    pub fn current(&self) -> Option<Cell> {
        self.memory.get(self.pointer)
    }

    /// Whether the active cell counts as true for control flow.
    /// An empty memory has no true cell.
    pub fn current_is_nonzero(&self) -> bool {
        self.current().is_some_and(|cell| cell.is_nonzero())
    }

    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    /// The active cell, recording an out-of-bounds diagnostic for an empty memory
    pub(crate) fn current_cell(&mut self, location: SourceLocation) -> Option<Cell> {
        let cell = self.current();
        if cell.is_none() {
            self.record(Diagnostic::OutOfBounds {
                index: self.pointer as i64,
                size: self.memory.len(),
                location,
            });
        }
        cell
    }

    /// The active cell as an integer, recording a type mismatch for characters
    pub(crate) fn current_int(&mut self, location: SourceLocation) -> Option<i64> {
        let cell = self.current_cell(location)?;
        let n = cell.as_int();
        if n.is_none() {
            self.record(Diagnostic::TypeMismatch {
                expected: "integer".to_string(),
                given: cell.kind().to_string(),
                location,
            });
        }
        n
    }

    /// The active cell read as a decimal number, recording not-numeric for a
    /// character that is not a digit
    pub(crate) fn current_decimal(&mut self, location: SourceLocation) -> Option<i64> {
        let cell = self.current_cell(location)?;
        let n = cell.decimal();
        if n.is_none() {
            let text = cell.as_char().map_or_else(|| cell.to_string(), String::from);
            self.record(Diagnostic::NotNumeric { text, location });
        }
        n
    }

    pub(crate) fn set_current(&mut self, cell: Cell) {
        self.memory.set(self.pointer, cell);
    }

    /// Resolve a program-supplied index, recording out-of-bounds on failure
    pub(crate) fn checked_index(&mut self, index: i64, location: SourceLocation) -> Option<usize> {
        let checked = self.memory.checked_index(index);
        if checked.is_none() {
            self.record(Diagnostic::OutOfBounds {
                index,
                size: self.memory.len(),
                location,
            });
        }
        checked
    }

    /// Parse an integer argument, recording not-numeric on failure
    pub(crate) fn parse_number(
        &mut self,
        argument: Option<&str>,
        location: SourceLocation,
    ) -> Option<i64> {
        let text = argument.unwrap_or_default();
        match text.trim().parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.record(Diagnostic::NotNumeric {
                    text: text.to_string(),
                    location,
                });
                None
            }
        }
    }
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Memory:")?;
        writeln!(f, "    {}", self.memory)?;
        writeln!(f, "Pointer:")?;
        writeln!(f, "    {}", self.pointer)?;
        write!(f, "Errors:")?;
        for error in &self.errors {
            write!(f, "\n    {}", error)?;
        }
        Ok(())
    }
}
