//! Console seam between the interpreter and the outside world
//!
//! Print and scan instructions, and the "continue after errors?" question
//! asked between pipeline stages, all go through the [`Console`] trait:
//! - [`StdConsole`]: stdout/stdin, used by the binary
//! - [`MockTerminal`]: captured output and scripted input, used by tests
//! - [`Recording`]: wrapper keeping the transcript the inspector replays

use crate::errors::Diagnostic;
use crate::pipeline::Stage;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Everything the interpreter needs from a terminal
pub trait Console {
    /// Write text without adding a newline
    fn print(&mut self, text: &str);

    /// Block until a line of input is available.
    /// Returns the line without its terminator, or None at end of input.
    fn read_line(&mut self) -> Option<String>;

    /// Asked after a stage that produced diagnostics, unless errors are
    /// ignored. Returning false stops the pipeline.
    fn continue_after(&mut self, stage: Stage, diagnostics: &[Diagnostic]) -> bool;
}

impl<T: Console + ?Sized> Console for &mut T {
    fn print(&mut self, text: &str) {
        (**self).print(text);
    }

    fn read_line(&mut self) -> Option<String> {
        (**self).read_line()
    }

    fn continue_after(&mut self, stage: Stage, diagnostics: &[Diagnostic]) -> bool {
        (**self).continue_after(stage, diagnostics)
    }
}

/// Strip one trailing `\n` or `\r\n`
fn trim_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

/// Console on the process's stdout and stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        StdConsole
    }
}

impl Console for StdConsole {
    fn print(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        // Output errors (closed pipe) are not a program error
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                trim_line_ending(&mut line);
                Some(line)
            }
        }
    }

    fn continue_after(&mut self, stage: Stage, diagnostics: &[Diagnostic]) -> bool {
        eprintln!("There were {} errors:", stage);
        for diagnostic in diagnostics {
            eprintln!("    {}", diagnostic);
        }
        eprint!("Would you like to continue? y/n ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
            Err(_) => false,
        }
    }
}

/// Console wrapper that keeps a transcript of a run.
///
/// Printed text and echoed input lines are appended in the order they
/// happen, so a snapshot can refer to a prefix of the transcript.
#[derive(Debug)]
pub struct Recording<C> {
    inner: C,
    transcript: String,
}

impl<C: Console> Recording<C> {
    pub fn new(inner: C) -> Self {
        Recording {
            inner,
            transcript: String::new(),
        }
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn into_parts(self) -> (C, String) {
        (self.inner, self.transcript)
    }
}

impl<C: Console> Console for Recording<C> {
    fn print(&mut self, text: &str) {
        self.inner.print(text);
        self.transcript.push_str(text);
    }

    fn read_line(&mut self) -> Option<String> {
        let line = self.inner.read_line()?;
        self.transcript.push_str(&line);
        self.transcript.push('\n');
        Some(line)
    }

    fn continue_after(&mut self, stage: Stage, diagnostics: &[Diagnostic]) -> bool {
        self.inner.continue_after(stage, diagnostics)
    }
}

/// Mock terminal for capturing output and feeding input in tests
#[derive(Debug, Clone, Default)]
pub struct MockTerminal {
    output: String,
    input: VecDeque<String>,
    answers: VecDeque<bool>,
    prompts: Vec<(Stage, usize)>,
}

impl MockTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue lines returned by successive `read_line` calls
    pub fn with_input<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Queue answers for successive `continue_after` calls.
    /// Once they run out every answer is yes.
    pub fn with_answers<I>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        self.answers.extend(answers);
        self
    }

    /// Everything printed so far
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Printed output split into lines
    pub fn get_output(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.output.split('\n').map(|s| s.to_string()).collect();
        // Remove trailing empty string if text ended with newline
        if lines.last().is_some_and(|s| s.is_empty()) {
            lines.pop();
        }
        lines
    }

    /// Stages the pipeline asked about, with their diagnostic counts
    pub fn prompts(&self) -> &[(Stage, usize)] {
        &self.prompts
    }
}

impl Console for MockTerminal {
    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }

    fn continue_after(&mut self, stage: Stage, diagnostics: &[Diagnostic]) -> bool {
        self.prompts.push((stage, diagnostics.len()));
        self.answers.pop_front().unwrap_or(true)
    }
}
