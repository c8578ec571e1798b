//! Token to instruction mapping
//!
//! This module provides the [`Parser`], which binds each [`Token`] to the
//! [`Operation`] it names through a constant table.
//!
//! The parser is purely structural. Loop and if matching and label
//! resolution are left to the execution engine, so a token without an
//! operation is reported and skipped instead of stopping the parse.

use crate::errors::Diagnostic;
use crate::parser::ast::{Instruction, Operation};
use crate::parser::lexer::{Command, Token};

/// The command → operation table.
///
/// Terminators and comment markers have no operation of their own; comments
/// never reach the parser, and a stray `"` or `]` is reported as an unknown
/// token.
pub const fn operation_for(command: Command) -> Option<Operation> {
    let operation = match command {
        Command::LabelGoto => Operation::LabelGoto,
        Command::LabelDeclare => Operation::LabelDeclare,
        Command::LabelGotoNonzero => Operation::LabelGotoNonzero,
        Command::LabelGotoZero => Operation::LabelGotoZero,
        Command::LoopStart => Operation::LoopStart,
        Command::LoopEnd => Operation::LoopEnd,
        Command::IfStart => Operation::IfStart,
        Command::IfEnd => Operation::IfEnd,
        Command::CellIncrease => Operation::CellIncrease,
        Command::CellDecrease => Operation::CellDecrease,
        Command::CellFlip => Operation::CellFlip,
        Command::CellSet => Operation::CellSet,
        Command::CellIncreaseWith => Operation::CellIncreaseWith,
        Command::CopyValueRight => Operation::CopyValueRight,
        Command::CopyValueTo => Operation::CopyValueTo,
        Command::PointerMoveLeft => Operation::PointerMoveLeft,
        Command::PointerMoveRight => Operation::PointerMoveRight,
        Command::PointerMoveTo => Operation::PointerMoveTo,
        Command::PointerMoveRelative => Operation::PointerMoveRelative,
        Command::CellSubtractAscii => Operation::CellSubtractAscii,
        Command::CellAddRight => Operation::CellAddRight,
        Command::CellSubtractRight => Operation::CellSubtractRight,
        Command::CellMultiplyRight => Operation::CellMultiplyRight,
        Command::CellDivideRight => Operation::CellDivideRight,
        Command::ScanAscii => Operation::ScanAscii,
        Command::ScanDecimal => Operation::ScanDecimal,
        Command::PrintCellAscii => Operation::PrintCellAscii,
        Command::PrintCellDecimal => Operation::PrintCellDecimal,
        Command::PrintCharacter => Operation::PrintCharacter,
        Command::PrintUntil => Operation::PrintUntil,
        Command::PrintProgramState => Operation::PrintProgramState,
        Command::PrintStop | Command::Comment | Command::CommentStart | Command::CommentEnd => {
            return None;
        }
    };
    Some(operation)
}

/// Maps a token list to instructions
pub struct Parser<'t> {
    tokens: &'t [Token],
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser { tokens }
    }

    /// Parse every token.
    ///
    /// Returns the instructions and the diagnostics, each in token order.
    pub fn parse(&self) -> (Vec<Instruction>, Vec<Diagnostic>) {
        let mut instructions = Vec::with_capacity(self.tokens.len());
        let mut errors = Vec::new();

        for token in self.tokens {
            match Self::find_operation(token) {
                Ok(instruction) => instructions.push(instruction),
                Err(error) => errors.push(error),
            }
        }

        (instructions, errors)
    }

    fn find_operation(token: &Token) -> Result<Instruction, Diagnostic> {
        let operation = token
            .command
            .and_then(operation_for)
            .ok_or_else(|| Diagnostic::UnknownToken {
                token: token.clone(),
            })?;

        let argument = if operation.takes_argument() {
            token.payload.clone()
        } else {
            None
        };

        Ok(Instruction::new(operation, argument, token.location))
    }
}

/// Parse `tokens` in one call
pub fn parse(tokens: &[Token]) -> (Vec<Instruction>, Vec<Diagnostic>) {
    Parser::new(tokens).parse()
}
