//! Cell value representation
//!
//! This module defines the [`Cell`] enum, the content of one memory slot.
//! Cells start as integers and may hold a single character after the ASCII
//! input instruction, so every operation checks the variant it needs instead
//! of coercing silently.

use std::fmt;

/// One addressable memory slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Int(i64),
    Char(char),
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Int(0)
    }
}

impl Cell {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(n) => Some(*n),
            Cell::Char(_) => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Cell::Char(c) => Some(*c),
            Cell::Int(_) => None,
        }
    }

    /// Decimal reading of the cell: integers as-is, a digit character as its
    /// digit value. Any other character has no decimal reading.
    pub fn decimal(&self) -> Option<i64> {
        match self {
            Cell::Int(n) => Some(*n),
            Cell::Char(c) => c.to_digit(10).map(i64::from),
        }
    }

    /// The cell as a number: integers as-is, characters by code point
    pub fn code(&self) -> i64 {
        match self {
            Cell::Int(n) => *n,
            Cell::Char(c) => *c as i64,
        }
    }

    /// Truth value used by loops, ifs and conditional gotos
    pub fn is_nonzero(&self) -> bool {
        match self {
            Cell::Int(n) => *n != 0,
            Cell::Char(c) => *c != '\0',
        }
    }

    /// Name of the variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Cell::Int(_) => "integer",
            Cell::Char(_) => "character",
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Char(c) => write!(f, "'{}'", c.escape_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Cell::default(), Cell::Int(0));
        assert!(!Cell::default().is_nonzero());
    }

    #[test]
    fn test_truthiness() {
        assert!(Cell::Int(-3).is_nonzero());
        assert!(Cell::Char('a').is_nonzero());
        assert!(!Cell::Char('\0').is_nonzero());
    }

    #[test]
    fn test_decimal_reading() {
        assert_eq!(Cell::Int(-12).decimal(), Some(-12));
        assert_eq!(Cell::Char('7').decimal(), Some(7));
        assert_eq!(Cell::Char('0').decimal(), Some(0));
        assert_eq!(Cell::Char('a').decimal(), None);
        assert_eq!(Cell::Char('\n').decimal(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::Int(42).to_string(), "42");
        assert_eq!(Cell::Char('a').to_string(), "'a'");
        assert_eq!(Cell::Char('\n').to_string(), "'\\n'");
    }
}
