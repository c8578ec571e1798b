//! Input/output operations
//!
//! Reads block on [`Console::read_line`]; writes never add a newline of their
//! own. The two-character escape `\n` in printed text becomes a real newline.

use crate::errors::Diagnostic;
use crate::interpreter::constants::NEWLINE_ESCAPE;
use crate::interpreter::state::ProgramState;
use crate::memory::value::Cell;
use crate::parser::ast::SourceLocation;
use crate::terminal::Console;

impl ProgramState {
    /// Store the first character of the next input line; an empty line stores `'\n'`
    pub(crate) fn scan_ascii<C: Console + ?Sized>(&mut self, console: &mut C, location: SourceLocation) {
        if self.current_cell(location).is_none() {
            return;
        }
        if let Some(line) = console.read_line() {
            let ch = line.chars().next().unwrap_or('\n');
            self.set_current(Cell::Char(ch));
        }
    }

    pub(crate) fn scan_decimal<C: Console + ?Sized>(&mut self, console: &mut C, location: SourceLocation) {
        if self.current_cell(location).is_none() {
            return;
        }
        let line = console.read_line().unwrap_or_default();
        if let Some(n) = self.parse_number(Some(&line), location) {
            self.set_current(Cell::Int(n));
        }
    }

    pub(crate) fn print_cell_ascii<C: Console + ?Sized>(&mut self, console: &mut C, location: SourceLocation) {
        let Some(cell) = self.current_cell(location) else {
            return;
        };
        let ch = match cell {
            Cell::Char(c) => Some(c),
            Cell::Int(n) => u32::try_from(n).ok().and_then(char::from_u32),
        };
        match ch {
            Some(c) => console.print(c.encode_utf8(&mut [0; 4])),
            None => self.record(Diagnostic::TypeMismatch {
                expected: "character code".to_string(),
                given: cell.to_string(),
                location,
            }),
        }
    }

    /// Integers print as-is and a digit character prints its digit; any other
    /// character records not-numeric and prints nothing
    pub(crate) fn print_cell_decimal<C: Console + ?Sized>(&mut self, console: &mut C, location: SourceLocation) {
        if let Some(n) = self.current_decimal(location) {
            console.print(&n.to_string());
        }
    }

    pub(crate) fn print_text<C: Console + ?Sized>(&self, console: &mut C, argument: Option<&str>) {
        if let Some(text) = argument {
            console.print(&text.replace(NEWLINE_ESCAPE, "\n"));
        }
    }

    /// Debug dump: pointer and memory on one line
    pub(crate) fn print_program_state<C: Console + ?Sized>(&self, console: &mut C) {
        console.print(&format!("{} {}\n", self.pointer, self.memory));
    }
}
