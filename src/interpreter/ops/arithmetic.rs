//! Arithmetic between the active cell and its right neighbour

use crate::errors::Diagnostic;
use crate::interpreter::state::ProgramState;
use crate::memory::value::Cell;
use crate::parser::ast::SourceLocation;

/// Binary operation applied as `current = current op right`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    /// Apply the operation; None only for division by zero.
    /// Overflow wraps, division truncates toward zero.
    pub fn apply(self, left: i64, right: i64) -> Option<i64> {
        match self {
            ArithmeticOp::Add => Some(left.wrapping_add(right)),
            ArithmeticOp::Subtract => Some(left.wrapping_sub(right)),
            ArithmeticOp::Multiply => Some(left.wrapping_mul(right)),
            ArithmeticOp::Divide if right == 0 => None,
            ArithmeticOp::Divide => Some(left.wrapping_div(right)),
        }
    }
}

impl ProgramState {
    pub(crate) fn cell_arithmetic_right(&mut self, op: ArithmeticOp, location: SourceLocation) {
        let Some(right_index) = self.checked_index(self.pointer as i64 + 1, location) else {
            return;
        };
        let Some(left) = self.current_int(location) else {
            return;
        };
        let Some(right_cell) = self.memory.get(right_index) else {
            return;
        };
        let Some(right) = right_cell.as_int() else {
            self.record(Diagnostic::TypeMismatch {
                expected: "integer".to_string(),
                given: right_cell.kind().to_string(),
                location,
            });
            return;
        };

        match op.apply(left, right) {
            Some(result) => self.set_current(Cell::Int(result)),
            None => self.record(Diagnostic::DivisionByZero { location }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    fn state_with(left: i64, right: i64) -> ProgramState {
        let mut state = ProgramState::new(2);
        state.memory.set(0, Cell::Int(left));
        state.memory.set(1, Cell::Int(right));
        state
    }

    #[test]
    fn test_operations() {
        for (op, expected) in [
            (ArithmeticOp::Add, 9),
            (ArithmeticOp::Subtract, 5),
            (ArithmeticOp::Multiply, 14),
            (ArithmeticOp::Divide, 3),
        ] {
            let mut state = state_with(7, 2);
            state.cell_arithmetic_right(op, loc());
            assert_eq!(state.current(), Some(Cell::Int(expected)), "{:?}", op);
            assert_eq!(state.memory.get(1), Some(Cell::Int(2)));
        }
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        let mut state = state_with(-7, 2);
        state.cell_arithmetic_right(ArithmeticOp::Divide, loc());
        assert_eq!(state.current(), Some(Cell::Int(-3)));
    }

    #[test]
    fn test_division_by_zero() {
        let mut state = state_with(8, 0);
        state.cell_arithmetic_right(ArithmeticOp::Divide, loc());

        assert_eq!(state.current(), Some(Cell::Int(8)));
        assert_eq!(
            state.errors,
            vec![Diagnostic::DivisionByZero { location: loc() }]
        );
    }

    #[test]
    fn test_character_neighbour() {
        let mut state = state_with(1, 0);
        state.memory.set(1, Cell::Char('x'));
        state.cell_arithmetic_right(ArithmeticOp::Add, loc());

        assert_eq!(state.current(), Some(Cell::Int(1)));
        assert!(matches!(state.errors.as_slice(), [Diagnostic::TypeMismatch { .. }]));
    }

    #[test]
    fn test_no_right_neighbour() {
        let mut state = ProgramState::new(1);
        state.cell_arithmetic_right(ArithmeticOp::Multiply, loc());

        assert!(matches!(
            state.errors.as_slice(),
            [Diagnostic::OutOfBounds { index: 1, size: 1, .. }]
        ));
    }
}
