// Execution engine for the WTFZOMFG interpreter

use crate::interpreter::jumps::collect_labels;
use crate::interpreter::ops::ArithmeticOp;
use crate::interpreter::state::ProgramState;
use crate::parser::ast::{Instruction, Operation};
use crate::snapshot::{Snapshot, SnapshotManager};
use crate::terminal::{Console, Recording};

/// What the engine does after one instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ControlFlow {
    /// Continue with the following instruction
    Next,
    /// Continue at the given instruction index
    Jump(usize),
    /// Stop the run
    Halt,
}

/// Everything a finished run hands back
#[derive(Debug)]
pub struct Execution {
    pub instructions: Vec<Instruction>,
    pub state: ProgramState,
    pub steps: u64,
    /// Printed output and echoed input, in order
    pub output: String,
    pub history: Option<SnapshotManager>,
}

/// Runs an instruction sequence against a [`ProgramState`]
pub struct Interpreter<C: Console> {
    /// Parsed program; never mutated
    pub(crate) instructions: Vec<Instruction>,

    pub(crate) state: ProgramState,

    console: Recording<C>,

    /// Index of each entered, not yet finished `LoopStart`, innermost last
    pub(crate) loop_frames: Vec<usize>,

    /// Number of instructions executed so far
    steps: u64,

    /// Snapshot history, when requested
    history: Option<SnapshotManager>,

    /// Whether execution has finished
    finished: bool,
}

impl<C: Console> Interpreter<C> {
    /// Create an interpreter with zeroed memory.
    ///
    /// Labels are collected here, so every goto can see every declaration
    /// before the first instruction runs.
    pub fn new(instructions: Vec<Instruction>, memory_size: usize, console: C) -> Self {
        let mut state = ProgramState::new(memory_size);
        state.goto_labels = collect_labels(&instructions);

        Interpreter {
            instructions,
            state,
            console: Recording::new(console),
            loop_frames: Vec::new(),
            steps: 0,
            history: None,
            finished: false,
        }
    }

    /// Record a snapshot before every instruction, within `max_memory` bytes
    pub fn with_history(mut self, max_memory: usize) -> Self {
        self.history = Some(SnapshotManager::new(max_memory));
        self
    }

    /// Run the program until it halts or runs past its last instruction
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Execute one instruction.
    /// Returns false once the program has finished.
    pub fn step(&mut self) -> bool {
        if self.finished {
            return false;
        }

        let index = self.state.next_index;
        if index >= self.instructions.len() {
            self.finish();
            return false;
        }

        self.take_snapshot(Some(index));
        self.steps += 1;

        match self.execute_instruction(index) {
            ControlFlow::Next => self.state.next_index = index + 1,
            ControlFlow::Jump(target) => self.state.next_index = target,
            ControlFlow::Halt => {
                self.finish();
                return false;
            }
        }
        true
    }

    fn finish(&mut self) {
        self.finished = true;
        self.take_snapshot(None);
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Output transcript so far
    pub fn output(&self) -> &str {
        self.console.transcript()
    }

    pub fn history(&self) -> Option<&SnapshotManager> {
        self.history.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_execution(self) -> Execution {
        let (_, output) = self.console.into_parts();
        Execution {
            instructions: self.instructions,
            state: self.state,
            steps: self.steps,
            output,
            history: self.history,
        }
    }

    fn take_snapshot(&mut self, instruction_index: Option<usize>) {
        let Some(history) = self.history.as_mut() else {
            return;
        };
        if history.is_truncated() {
            return;
        }

        let snapshot = Snapshot {
            memory: self.state.memory.clone(),
            pointer: self.state.pointer,
            instruction_index,
            output_len: self.console.transcript().len(),
            error_count: self.state.errors.len(),
            loop_depth: self.loop_frames.len(),
        };
        // A rejected snapshot only marks the history truncated
        let _ = history.push(snapshot);
    }

    fn execute_instruction(&mut self, index: usize) -> ControlFlow {
        match self.instructions[index].operation {
            Operation::IfStart => self.execute_if_start(index),
            Operation::IfEnd | Operation::LabelDeclare => ControlFlow::Next,
            Operation::LoopStart => self.execute_loop_start(index),
            Operation::LoopEnd => self.execute_loop_end(),
            Operation::LabelGoto => self.execute_goto(index, true),
            Operation::LabelGotoNonzero => {
                let location = self.instructions[index].location;
                let condition = self.state.current_decimal(location).is_some_and(|n| n != 0);
                self.execute_goto(index, condition)
            }
            Operation::LabelGotoZero => {
                let location = self.instructions[index].location;
                let condition = self.state.current_decimal(location) == Some(0);
                self.execute_goto(index, condition)
            }
            _ => {
                self.execute_operation(index);
                ControlFlow::Next
            }
        }
    }

    /// Run a non-control operation; failures are recorded on the state
    fn execute_operation(&mut self, index: usize) {
        let instruction = &self.instructions[index];
        let argument = instruction.argument();
        let location = instruction.location;
        let state = &mut self.state;
        let console = &mut self.console;

        match instruction.operation {
            Operation::CellIncrease => state.cell_increase(location),
            Operation::CellDecrease => state.cell_decrease(location),
            Operation::CellFlip => state.cell_flip(location),
            Operation::CellSet => state.cell_set(argument, location),
            Operation::CellIncreaseWith => state.cell_increase_with(argument, location),
            Operation::CopyValueRight => state.copy_value_right(location),
            Operation::CopyValueTo => state.copy_value_to(argument, location),
            Operation::PointerMoveLeft => state.pointer_move_left(location),
            Operation::PointerMoveRight => state.pointer_move_right(location),
            Operation::PointerMoveTo => state.pointer_move_to(argument, location),
            Operation::PointerMoveRelative => state.pointer_move_relative(argument, location),
            Operation::CellSubtractAscii => state.cell_subtract_ascii(argument, location),
            Operation::CellAddRight => state.cell_arithmetic_right(ArithmeticOp::Add, location),
            Operation::CellSubtractRight => {
                state.cell_arithmetic_right(ArithmeticOp::Subtract, location)
            }
            Operation::CellMultiplyRight => {
                state.cell_arithmetic_right(ArithmeticOp::Multiply, location)
            }
            Operation::CellDivideRight => {
                state.cell_arithmetic_right(ArithmeticOp::Divide, location)
            }
            Operation::ScanAscii => state.scan_ascii(console, location),
            Operation::ScanDecimal => state.scan_decimal(console, location),
            Operation::PrintCellAscii => state.print_cell_ascii(console, location),
            Operation::PrintCellDecimal => state.print_cell_decimal(console, location),
            Operation::PrintCharacter | Operation::PrintUntil => {
                state.print_text(console, argument)
            }
            Operation::PrintProgramState => state.print_program_state(console),
            Operation::LabelGoto
            | Operation::LabelDeclare
            | Operation::LabelGotoNonzero
            | Operation::LabelGotoZero
            | Operation::LoopStart
            | Operation::LoopEnd
            | Operation::IfStart
            | Operation::IfEnd => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Diagnostic;
    use crate::memory::value::Cell;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::parse;
    use crate::terminal::MockTerminal;

    fn run_with(source: &str, memory_size: usize, terminal: &mut MockTerminal) -> Execution {
        let (tokens, _) = tokenize(source);
        let (instructions, _) = parse(&tokens);
        let mut interpreter = Interpreter::new(instructions, memory_size, terminal);
        interpreter.run();
        interpreter.into_execution()
    }

    fn run(source: &str, memory_size: usize) -> Execution {
        run_with(source, memory_size, &mut MockTerminal::new())
    }

    #[test]
    fn test_straight_line() {
        let execution = run("+++ > ++ w", 2);

        assert_eq!(execution.state.memory.cells(), &[Cell::Int(3), Cell::Int(2)]);
        assert_eq!(execution.state.pointer, 1);
        assert_eq!(execution.output, "1 [3, 2]\n");
        assert_eq!(execution.steps, 7);
    }

    #[test]
    fn test_loop_counts_down() {
        let execution = run("=4 ( - > + < )", 2);

        assert_eq!(execution.state.memory.cells(), &[Cell::Int(0), Cell::Int(4)]);
        assert!(execution.state.errors.is_empty());
    }

    #[test]
    fn test_false_loop_is_skipped() {
        let execution = run("( + ( + ) + ) -", 1);
        assert_eq!(execution.state.current(), Some(Cell::Int(-1)));
    }

    #[test]
    fn test_if_taken_and_skipped() {
        let execution = run("{ 'skipped\" } + { { - } 'taken\" }", 1);

        assert_eq!(execution.output, "taken");
        assert_eq!(execution.state.current(), Some(Cell::Int(0)));
    }

    #[test]
    fn test_forward_goto_skips_code() {
        let execution = run(":end + ;end \\", 1);
        assert_eq!(execution.output, "0");
    }

    #[test]
    fn test_conditional_gotos() {
        let execution = run("?a + ;a !b + ;b \\", 1);
        // `?a` not taken (cell 0), `!b` not taken (cell 1)
        assert_eq!(execution.output, "2");
    }

    #[test]
    fn test_conditional_gotos_read_digit_characters() {
        let mut terminal = MockTerminal::new().with_input(["0"]);
        run_with("^ !z 'no\" ;z 'end\"", 1, &mut terminal);
        assert_eq!(terminal.output(), "end");

        let mut terminal = MockTerminal::new().with_input(["3"]);
        run_with("^ ?nz 'no\" ;nz 'end\"", 1, &mut terminal);
        assert_eq!(terminal.output(), "end");
    }

    #[test]
    fn test_conditional_goto_on_letter_is_not_numeric() {
        let mut terminal = MockTerminal::new().with_input(["q"]);
        let execution = run_with("^ ?x !x 'fell through\" ;x", 1, &mut terminal);

        assert_eq!(terminal.output(), "fell through");
        assert_eq!(execution.state.errors.len(), 2);
        assert!(execution
            .state
            .errors
            .iter()
            .all(|error| matches!(error, Diagnostic::NotNumeric { text, .. } if text == "q")));
    }

    #[test]
    fn test_goto_unknown_label_advances() {
        let execution = run(":nowhere +", 1);
        assert_eq!(execution.state.current(), Some(Cell::Int(1)));
    }

    #[test]
    fn test_unmatched_loop_end_halts() {
        let execution = run("+ ) +", 1);

        assert_eq!(execution.state.current(), Some(Cell::Int(1)));
        assert_eq!(execution.steps, 2);
    }

    #[test]
    fn test_loop_without_end_runs_off_the_program() {
        let execution = run("+ ( -", 1);
        assert_eq!(execution.state.current(), Some(Cell::Int(0)));
    }

    #[test]
    fn test_goto_back_into_loop_start() {
        let execution = run("=3 ;top ( - > + < :top ) \\", 2);

        assert_eq!(execution.state.memory.cells(), &[Cell::Int(0), Cell::Int(3)]);
        assert_eq!(execution.output, "0");
    }

    #[test]
    fn test_scan_and_echo() {
        let mut terminal = MockTerminal::new().with_input(["41"]);
        let execution = run_with("/ + \\", 1, &mut terminal);

        assert_eq!(execution.output, "41\n42");
        assert_eq!(terminal.output(), "42");
    }

    #[test]
    fn test_runtime_errors_do_not_stop_the_run() {
        let execution = run("< + d \\", 2);

        assert_eq!(execution.output, "1");
        assert!(matches!(
            execution.state.errors.as_slice(),
            [
                Diagnostic::OutOfBounds { index: -1, .. },
                Diagnostic::DivisionByZero { .. }
            ]
        ));
    }

    #[test]
    fn test_history_records_every_step() {
        let (tokens, _) = tokenize("+ > +");
        let (instructions, _) = parse(&tokens);
        let mut interpreter =
            Interpreter::new(instructions, 2, MockTerminal::new()).with_history(1024 * 1024);
        interpreter.run();

        let history = interpreter.history().unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history.get(0).unwrap().instruction_index, Some(0));
        assert_eq!(history.get(1).unwrap().memory.get(0), Some(Cell::Int(1)));
        assert_eq!(history.get(2).unwrap().pointer, 1);
        assert_eq!(history.last().unwrap().instruction_index, None);
    }

    #[test]
    fn test_step_after_finish() {
        let mut interpreter = Interpreter::new(Vec::new(), 1, MockTerminal::new());

        assert!(!interpreter.step());
        assert!(interpreter.is_finished());
        assert!(!interpreter.step());
        assert_eq!(interpreter.steps(), 0);
    }
}
