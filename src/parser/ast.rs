// Instruction definitions for the WTFZOMFG interpreter

use std::fmt;

/// Source location information for error reporting.
///
/// WTFZOMFG is whitespace separated, so a position is a 1-based line and a
/// 1-based word within that line rather than a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub word: usize,
}

impl SourceLocation {
    pub fn new(line: usize, word: usize) -> Self {
        Self { line, word }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, word {}", self.line, self.word)
    }
}

/// Every operation an instruction can perform.
///
/// The engine dispatches on this with a single exhaustive `match`, so adding
/// a variant forces every dispatch site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Control
    LabelGoto,
    LabelDeclare,
    LabelGotoNonzero,
    LabelGotoZero,
    LoopStart,
    LoopEnd,
    IfStart,
    IfEnd,

    // Cell/pointer manipulation
    CellIncrease,
    CellDecrease,
    CellFlip,
    CellSet,
    CellIncreaseWith,
    CopyValueRight,
    CopyValueTo,
    PointerMoveLeft,
    PointerMoveRight,
    PointerMoveTo,
    PointerMoveRelative,
    CellSubtractAscii,

    // Arithmetic on the right neighbour
    CellAddRight,
    CellSubtractRight,
    CellMultiplyRight,
    CellDivideRight,

    // Input/output
    ScanAscii,
    ScanDecimal,
    PrintCellAscii,
    PrintCellDecimal,
    PrintCharacter,
    PrintUntil,

    // Debug
    PrintProgramState,
}

impl Operation {
    /// Whether the operation consumes the token payload as its argument
    pub fn takes_argument(self) -> bool {
        matches!(
            self,
            Operation::LabelGoto
                | Operation::LabelDeclare
                | Operation::LabelGotoNonzero
                | Operation::LabelGotoZero
                | Operation::CellSet
                | Operation::CellIncreaseWith
                | Operation::CopyValueTo
                | Operation::PointerMoveTo
                | Operation::PointerMoveRelative
                | Operation::CellSubtractAscii
                | Operation::PrintCharacter
                | Operation::PrintUntil
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::LabelGoto => "label_goto",
            Operation::LabelDeclare => "label_declare",
            Operation::LabelGotoNonzero => "label_goto_nonzero",
            Operation::LabelGotoZero => "label_goto_zero",
            Operation::LoopStart => "loop_start",
            Operation::LoopEnd => "loop_end",
            Operation::IfStart => "if_start",
            Operation::IfEnd => "if_end",
            Operation::CellIncrease => "cell_increase",
            Operation::CellDecrease => "cell_decrease",
            Operation::CellFlip => "cell_flip",
            Operation::CellSet => "cell_set",
            Operation::CellIncreaseWith => "cell_increase_with",
            Operation::CopyValueRight => "copy_value_right",
            Operation::CopyValueTo => "copy_value_to",
            Operation::PointerMoveLeft => "pointer_move_left",
            Operation::PointerMoveRight => "pointer_move_right",
            Operation::PointerMoveTo => "pointer_move_to",
            Operation::PointerMoveRelative => "pointer_move_relative",
            Operation::CellSubtractAscii => "cell_subtract_ascii",
            Operation::CellAddRight => "cell_add_right",
            Operation::CellSubtractRight => "cell_subtract_right",
            Operation::CellMultiplyRight => "cell_multiply_right",
            Operation::CellDivideRight => "cell_divide_right",
            Operation::ScanAscii => "scan_ascii",
            Operation::ScanDecimal => "scan_decimal",
            Operation::PrintCellAscii => "print_cell_ascii",
            Operation::PrintCellDecimal => "print_cell_decimal",
            Operation::PrintCharacter => "print_character",
            Operation::PrintUntil => "print_until",
            Operation::PrintProgramState => "print_program_state",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed, directly executable unit: one operation bound to its optional argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub operation: Operation,
    pub argument: Option<String>,
    pub location: SourceLocation,
}

impl Instruction {
    pub fn new(operation: Operation, argument: Option<String>, location: SourceLocation) -> Self {
        Instruction {
            operation,
            argument,
            location,
        }
    }

    /// The argument, treating an empty payload the same as a missing one
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref().filter(|arg| !arg.is_empty())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument() {
            Some(arg) => write!(f, "{}({})", self.operation, arg),
            None => write!(f, "{}", self.operation),
        }
    }
}
