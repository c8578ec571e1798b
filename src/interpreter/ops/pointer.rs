//! Pointer movement
//!
//! Every move is bounds-checked: a target outside the memory records
//! [`Diagnostic::OutOfBounds`](crate::errors::Diagnostic::OutOfBounds) and
//! leaves the pointer where it was.

use crate::interpreter::state::ProgramState;
use crate::parser::ast::SourceLocation;

impl ProgramState {
    pub(crate) fn pointer_move_left(&mut self, location: SourceLocation) {
        self.move_pointer(self.pointer as i64 - 1, location);
    }

    pub(crate) fn pointer_move_right(&mut self, location: SourceLocation) {
        self.move_pointer(self.pointer as i64 + 1, location);
    }

    pub(crate) fn pointer_move_to(&mut self, argument: Option<&str>, location: SourceLocation) {
        if let Some(target) = self.parse_number(argument, location) {
            self.move_pointer(target, location);
        }
    }

    pub(crate) fn pointer_move_relative(&mut self, argument: Option<&str>, location: SourceLocation) {
        if let Some(offset) = self.parse_number(argument, location) {
            self.move_pointer((self.pointer as i64).saturating_add(offset), location);
        }
    }

    fn move_pointer(&mut self, target: i64, location: SourceLocation) {
        if let Some(index) = self.checked_index(target, location) {
            self.pointer = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Diagnostic;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_left_of_zero_is_rejected() {
        let mut state = ProgramState::new(3);
        state.pointer_move_left(loc());

        assert_eq!(state.pointer, 0);
        assert!(matches!(
            state.errors.as_slice(),
            [Diagnostic::OutOfBounds { index: -1, size: 3, .. }]
        ));
    }

    #[test]
    fn test_move_to_and_relative() {
        let mut state = ProgramState::new(10);
        state.pointer_move_to(Some("4"), loc());
        state.pointer_move_relative(Some("-3"), loc());
        state.pointer_move_right(loc());

        assert_eq!(state.pointer, 2);
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_relative_past_end_is_rejected() {
        let mut state = ProgramState::new(5);
        state.pointer_move_relative(Some("5"), loc());

        assert_eq!(state.pointer, 0);
        assert_eq!(state.errors.len(), 1);
    }

    #[test]
    fn test_move_to_non_numeric() {
        let mut state = ProgramState::new(5);
        state.pointer_move_to(Some("two"), loc());

        assert_eq!(state.pointer, 0);
        assert!(matches!(state.errors.as_slice(), [Diagnostic::NotNumeric { .. }]));
    }
}
