//! The lexer → parser → engine pipeline behind one call
//!
//! Each stage's diagnostics are returned separately. Unless errors are
//! ignored, the console is asked after lexing and after parsing whether to
//! go on when that stage reported anything.

use crate::errors::Diagnostic;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::state::ProgramState;
use crate::parser::ast::Instruction;
use crate::parser::lexer::{tokenize, Token};
use crate::parser::parse::parse;
use crate::snapshot::SnapshotManager;
use crate::terminal::Console;
use std::fmt;

/// A pipeline stage that can report diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexing,
    Parsing,
    Execution,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Lexing => "lexer",
            Stage::Parsing => "parser",
            Stage::Execution => "runtime",
        };
        f.write_str(name)
    }
}

/// Everything a pipeline run produced, including partial results
#[derive(Debug)]
pub struct Interpretation {
    pub tokens: Vec<Token>,
    pub lexer_errors: Vec<Diagnostic>,
    pub instructions: Vec<Instruction>,
    pub parser_errors: Vec<Diagnostic>,
    /// Final state, or the initial one when the pipeline was stopped early
    pub state: ProgramState,
    pub steps: u64,
    /// Printed output and echoed input of the run
    pub output: String,
    /// Stage after which the console declined to continue
    pub halted_after: Option<Stage>,
    pub history: Option<SnapshotManager>,
}

impl Interpretation {
    /// Diagnostics reported by `stage`
    pub fn errors(&self, stage: Stage) -> &[Diagnostic] {
        match stage {
            Stage::Lexing => &self.lexer_errors,
            Stage::Parsing => &self.parser_errors,
            Stage::Execution => &self.state.errors,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted_after.is_some()
    }
}

/// Lex, parse and run `source` on `memory_size` cells
pub fn interpret<C: Console>(
    source: &str,
    memory_size: usize,
    ignore_errors: bool,
    console: &mut C,
) -> Interpretation {
    run_pipeline(source, memory_size, ignore_errors, console, None)
}

/// Like [`interpret`], also recording a snapshot history within `snapshot_limit` bytes
pub fn interpret_with_history<C: Console>(
    source: &str,
    memory_size: usize,
    ignore_errors: bool,
    console: &mut C,
    snapshot_limit: usize,
) -> Interpretation {
    run_pipeline(source, memory_size, ignore_errors, console, Some(snapshot_limit))
}

fn run_pipeline<C: Console>(
    source: &str,
    memory_size: usize,
    ignore_errors: bool,
    console: &mut C,
    snapshot_limit: Option<usize>,
) -> Interpretation {
    let (tokens, lexer_errors) = tokenize(source);
    let mut result = Interpretation {
        tokens,
        lexer_errors,
        instructions: Vec::new(),
        parser_errors: Vec::new(),
        state: ProgramState::new(memory_size),
        steps: 0,
        output: String::new(),
        halted_after: None,
        history: None,
    };

    if !proceed(console, Stage::Lexing, &result.lexer_errors, ignore_errors) {
        result.halted_after = Some(Stage::Lexing);
        return result;
    }

    let (instructions, parser_errors) = parse(&result.tokens);
    result.parser_errors = parser_errors;
    if !proceed(console, Stage::Parsing, &result.parser_errors, ignore_errors) {
        result.instructions = instructions;
        result.halted_after = Some(Stage::Parsing);
        return result;
    }

    let mut interpreter = Interpreter::new(instructions, memory_size, &mut *console);
    if let Some(limit) = snapshot_limit {
        interpreter = interpreter.with_history(limit);
    }
    interpreter.run();

    let execution = interpreter.into_execution();
    result.instructions = execution.instructions;
    result.state = execution.state;
    result.steps = execution.steps;
    result.output = execution.output;
    result.history = execution.history;
    result
}

fn proceed<C: Console>(
    console: &mut C,
    stage: Stage,
    diagnostics: &[Diagnostic],
    ignore_errors: bool,
) -> bool {
    ignore_errors || diagnostics.is_empty() || console.continue_after(stage, diagnostics)
}
