//! Cell manipulation: increment, decrement, flip, set, copy

use crate::errors::Diagnostic;
use crate::interpreter::state::ProgramState;
use crate::memory::value::Cell;
use crate::parser::ast::SourceLocation;

impl ProgramState {
    pub(crate) fn cell_increase(&mut self, location: SourceLocation) {
        if let Some(n) = self.current_int(location) {
            self.set_current(Cell::Int(n.wrapping_add(1)));
        }
    }

    pub(crate) fn cell_decrease(&mut self, location: SourceLocation) {
        if let Some(n) = self.current_int(location) {
            self.set_current(Cell::Int(n.wrapping_sub(1)));
        }
    }

    /// Zero becomes one, anything else becomes zero
    pub(crate) fn cell_flip(&mut self, location: SourceLocation) {
        if let Some(n) = self.current_int(location) {
            self.set_current(Cell::Int(i64::from(n == 0)));
        }
    }

    pub(crate) fn cell_set(&mut self, argument: Option<&str>, location: SourceLocation) {
        let Some(value) = self.parse_number(argument, location) else {
            return;
        };
        if self.current_cell(location).is_some() {
            self.set_current(Cell::Int(value));
        }
    }

    pub(crate) fn cell_increase_with(&mut self, argument: Option<&str>, location: SourceLocation) {
        let Some(amount) = self.parse_number(argument, location) else {
            return;
        };
        if let Some(n) = self.current_int(location) {
            self.set_current(Cell::Int(n.wrapping_add(amount)));
        }
    }

    /// Subtract the code of the argument's first character.
    ///
    /// Character cells take part by code point, which turns a scanned digit
    /// into its value with `@0`.
    pub(crate) fn cell_subtract_ascii(&mut self, argument: Option<&str>, location: SourceLocation) {
        let Some(subtrahend) = argument.and_then(|arg| arg.chars().next()) else {
            self.record(Diagnostic::TypeMismatch {
                expected: "character argument".to_string(),
                given: "nothing".to_string(),
                location,
            });
            return;
        };
        if let Some(cell) = self.current_cell(location) {
            self.set_current(Cell::Int(cell.code().wrapping_sub(subtrahend as i64)));
        }
    }

    pub(crate) fn copy_value_right(&mut self, location: SourceLocation) {
        let target = self.pointer as i64 + 1;
        self.copy_value(target, location);
    }

    pub(crate) fn copy_value_to(&mut self, argument: Option<&str>, location: SourceLocation) {
        if let Some(target) = self.parse_number(argument, location) {
            self.copy_value(target, location);
        }
    }

    fn copy_value(&mut self, target: i64, location: SourceLocation) {
        let Some(index) = self.checked_index(target, location) else {
            return;
        };
        if let Some(cell) = self.current_cell(location) {
            self.memory.set(index, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_increase_and_decrease() {
        let mut state = ProgramState::new(1);
        state.cell_increase(loc());
        state.cell_increase(loc());
        state.cell_decrease(loc());

        assert_eq!(state.current(), Some(Cell::Int(1)));
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_increase_on_character_is_rejected() {
        let mut state = ProgramState::new(1);
        state.set_current(Cell::Char('a'));
        state.cell_increase(loc());

        assert_eq!(state.current(), Some(Cell::Char('a')));
        assert!(matches!(
            state.errors.as_slice(),
            [Diagnostic::TypeMismatch { given, .. }] if given == "character"
        ));
    }

    #[test]
    fn test_flip() {
        let mut state = ProgramState::new(1);
        state.cell_flip(loc());
        assert_eq!(state.current(), Some(Cell::Int(1)));

        state.cell_set(Some("17"), loc());
        state.cell_flip(loc());
        assert_eq!(state.current(), Some(Cell::Int(0)));
    }

    #[test]
    fn test_flip_on_character_is_rejected() {
        let mut state = ProgramState::new(1);
        state.set_current(Cell::Char('0'));
        state.cell_flip(loc());

        assert_eq!(state.current(), Some(Cell::Char('0')));
        assert!(matches!(
            state.errors.as_slice(),
            [Diagnostic::TypeMismatch { given, .. }] if given == "character"
        ));
    }

    #[test]
    fn test_increase_with_on_character_is_rejected() {
        let mut state = ProgramState::new(1);
        state.set_current(Cell::Char('x'));
        state.cell_increase_with(Some("5"), loc());

        assert_eq!(state.current(), Some(Cell::Char('x')));
        assert!(matches!(
            state.errors.as_slice(),
            [Diagnostic::TypeMismatch { given, .. }] if given == "character"
        ));
    }

    #[test]
    fn test_set_with_non_numeric_argument() {
        let mut state = ProgramState::new(1);
        state.cell_set(Some("abc"), loc());

        assert_eq!(state.current(), Some(Cell::Int(0)));
        assert_eq!(
            state.errors,
            vec![Diagnostic::NotNumeric {
                text: "abc".to_string(),
                location: loc(),
            }]
        );
    }

    #[test]
    fn test_increase_with_negative() {
        let mut state = ProgramState::new(1);
        state.cell_increase_with(Some("-5"), loc());
        assert_eq!(state.current(), Some(Cell::Int(-5)));
    }

    #[test]
    fn test_subtract_ascii_from_character() {
        let mut state = ProgramState::new(1);
        state.set_current(Cell::Char('7'));
        state.cell_subtract_ascii(Some("0"), loc());

        assert_eq!(state.current(), Some(Cell::Int(7)));
    }

    #[test]
    fn test_subtract_ascii_without_argument() {
        let mut state = ProgramState::new(1);
        state.cell_subtract_ascii(None, loc());

        assert_eq!(state.current(), Some(Cell::Int(0)));
        assert_eq!(state.errors.len(), 1);
    }

    #[test]
    fn test_copy_right_at_last_cell() {
        let mut state = ProgramState::new(2);
        state.cell_set(Some("9"), loc());
        state.copy_value_right(loc());
        assert_eq!(state.memory.get(1), Some(Cell::Int(9)));

        state.pointer = 1;
        state.copy_value_right(loc());
        assert!(matches!(
            state.errors.as_slice(),
            [Diagnostic::OutOfBounds { index: 2, size: 2, .. }]
        ));
    }

    #[test]
    fn test_copy_to() {
        let mut state = ProgramState::new(4);
        state.cell_set(Some("3"), loc());
        state.copy_value_to(Some("3"), loc());
        state.copy_value_to(Some("4"), loc());

        assert_eq!(state.memory.get(3), Some(Cell::Int(3)));
        assert_eq!(state.errors.len(), 1);
    }

    #[test]
    fn test_copy_to_with_non_numeric_argument() {
        let mut state = ProgramState::new(3);
        state.cell_set(Some("4"), loc());
        let before = state.memory.clone();

        state.copy_value_to(Some("abc"), loc());

        assert_eq!(state.memory, before);
        assert_eq!(
            state.errors,
            vec![Diagnostic::NotNumeric {
                text: "abc".to_string(),
                location: loc(),
            }]
        );
    }
}
