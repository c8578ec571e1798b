//! Diagnostic types shared by every pipeline stage
//!
//! This module defines [`Diagnostic`], the structured record produced by the
//! lexer, the parser and the execution engine.
//!
//! No diagnostic is fatal. Each stage appends what it finds and carries on with
//! the best-effort next step, so a caller always receives partial results
//! alongside the full list of problems.

use crate::parser::ast::SourceLocation;
use crate::parser::lexer::Token;
use std::fmt;

/// Diagnostics produced while lexing, parsing or executing a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A character in the source is not part of the token table
    UnknownCharacter {
        character: char,
        word: String,
        location: SourceLocation,
    },

    /// A token has no associated operation
    UnknownToken { token: Token },

    /// An operation needed one kind of cell or argument and got another
    TypeMismatch {
        expected: String,
        given: String,
        location: SourceLocation,
    },

    /// An argument that must be an integer is not one
    NotNumeric {
        text: String,
        location: SourceLocation,
    },

    /// A pointer move or cell access outside the memory
    OutOfBounds {
        index: i64,
        size: usize,
        location: SourceLocation,
    },

    /// Division with a zero right neighbour
    DivisionByZero { location: SourceLocation },
}

impl Diagnostic {
    pub fn location(&self) -> SourceLocation {
        match self {
            Diagnostic::UnknownCharacter { location, .. } => *location,
            Diagnostic::UnknownToken { token } => token.location,
            Diagnostic::TypeMismatch { location, .. } => *location,
            Diagnostic::NotNumeric { location, .. } => *location,
            Diagnostic::OutOfBounds { location, .. } => *location,
            Diagnostic::DivisionByZero { location } => *location,
        }
    }

    /// Short kind name, as used in the rendered message
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::UnknownCharacter { .. } => "UnknownCharacter",
            Diagnostic::UnknownToken { .. } => "UnknownToken",
            Diagnostic::TypeMismatch { .. } => "TypeMismatch",
            Diagnostic::NotNumeric { .. } => "NotNumeric",
            Diagnostic::OutOfBounds { .. } => "OutOfBounds",
            Diagnostic::DivisionByZero { .. } => "DivisionByZero",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.kind())?;
        match self {
            Diagnostic::UnknownCharacter {
                character,
                word,
                location,
            } => {
                write!(
                    f,
                    "unknown character '{}' in word '{}' at {}",
                    character.escape_default(),
                    word,
                    location
                )
            }
            Diagnostic::UnknownToken { token } => {
                write!(
                    f,
                    "token {} at {} has no associated operation",
                    token, token.location
                )
            }
            Diagnostic::TypeMismatch {
                expected,
                given,
                location,
            } => {
                write!(
                    f,
                    "expected {}, got {} at {}",
                    expected, given, location
                )
            }
            Diagnostic::NotNumeric { text, location } => {
                write!(f, "'{}' is not an integer at {}", text, location)
            }
            Diagnostic::OutOfBounds {
                index,
                size,
                location,
            } => {
                write!(
                    f,
                    "index {} outside memory of {} cell{} at {}",
                    index,
                    size,
                    if *size == 1 { "" } else { "s" },
                    location
                )
            }
            Diagnostic::DivisionByZero { location } => {
                write!(f, "right neighbour is zero at {}", location)
            }
        }
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_kind_and_location() {
        let error = Diagnostic::OutOfBounds {
            index: -1,
            size: 1,
            location: SourceLocation::new(3, 2),
        };

        assert_eq!(
            error.to_string(),
            "OutOfBounds: index -1 outside memory of 1 cell at line 3, word 2"
        );
        assert_eq!(error.kind(), "OutOfBounds");
        assert_eq!(error.location(), SourceLocation::new(3, 2));
    }
}
