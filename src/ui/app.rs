//! Main TUI application state and logic

use crate::errors::Diagnostic;
use crate::memory::Memory;
use crate::parser::ast::SourceLocation;
use crate::pipeline::{Interpretation, Stage};
use crate::snapshot::Snapshot;
use crate::ui::panes::{MemoryScrollState, SourceScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Memory,
    Terminal,
    Diagnostics,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> terminal -> memory -> diagnostics)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Terminal,
            FocusedPane::Terminal => FocusedPane::Memory,
            FocusedPane::Memory => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The finished run being inspected
    pub interpretation: Interpretation,

    /// The source code that was executed
    pub source_code: String,

    /// Index of the selected snapshot
    pub position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub memory_scroll: MemoryScrollState,
    pub terminal_scroll: usize,
    pub diagnostics_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app positioned at the first snapshot
    pub fn new(interpretation: Interpretation, source_code: String) -> Self {
        let status_message = match &interpretation.history {
            Some(history) if history.is_truncated() => {
                format!("History truncated after {} steps", history.len())
            }
            Some(_) => String::from("Ready!"),
            None => String::from("No history recorded, showing the final state"),
        };

        App {
            interpretation,
            source_code,
            position: 0,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            memory_scroll: MemoryScrollState {
                offset: 0,
                follow_pointer: true,
            },
            terminal_scroll: usize::MAX,
            diagnostics_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Number of snapshots that can be selected
    pub fn total_snapshots(&self) -> usize {
        self.interpretation
            .history
            .as_ref()
            .map_or(0, |history| history.len())
    }

    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.interpretation
            .history
            .as_ref()
            .and_then(|history| history.get(self.position))
    }

    /// Memory and pointer shown for the selected step
    fn current_memory(&self) -> (&Memory, usize) {
        match self.current_snapshot() {
            Some(snapshot) => (&snapshot.memory, snapshot.pointer),
            None => (&self.interpretation.state.memory, self.interpretation.state.pointer),
        }
    }

    /// Source location of the instruction about to run
    fn current_location(&self) -> Option<SourceLocation> {
        let index = self.current_snapshot()?.instruction_index?;
        self.interpretation
            .instructions
            .get(index)
            .map(|instruction| instruction.location)
    }

    /// Output printed before the selected step
    pub fn visible_output(&self) -> &str {
        let output = self.interpretation.output.as_str();
        match self.current_snapshot() {
            Some(snapshot) => output.get(..snapshot.output_len).unwrap_or(output),
            None => output,
        }
    }

    /// Lexer and parser diagnostics, then runtime diagnostics recorded so far
    pub fn visible_diagnostics(&self) -> Vec<(Stage, &Diagnostic)> {
        let runtime = &self.interpretation.state.errors;
        let runtime_count = self
            .current_snapshot()
            .map_or(runtime.len(), |snapshot| snapshot.error_count);

        let lexer = self.interpretation.lexer_errors.iter().map(|d| (Stage::Lexing, d));
        let parser = self.interpretation.parser_errors.iter().map(|d| (Stage::Parsing, d));
        let execution = runtime
            .iter()
            .take(runtime_count)
            .map(|d| (Stage::Execution, d));
        lexer.chain(parser).chain(execution).collect()
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Terminal (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Memory (top) | Diagnostics (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        let location = self.current_location();
        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            location,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        let mut terminal_scroll = self.terminal_scroll;
        super::panes::render_terminal_pane(
            frame,
            left_rows[1],
            self.visible_output(),
            self.focused_pane == FocusedPane::Terminal,
            &mut terminal_scroll,
        );
        self.terminal_scroll = terminal_scroll;

        let mut memory_scroll = std::mem::take(&mut self.memory_scroll);
        let (memory, pointer) = self.current_memory();
        super::panes::render_memory_pane(
            frame,
            right_rows[0],
            memory,
            pointer,
            self.focused_pane == FocusedPane::Memory,
            &mut memory_scroll,
        );
        self.memory_scroll = memory_scroll;

        let mut diagnostics_scroll = self.diagnostics_scroll;
        super::panes::render_diagnostics_pane(
            frame,
            right_rows[1],
            &self.visible_diagnostics(),
            location,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut diagnostics_scroll,
        );
        self.diagnostics_scroll = diagnostics_scroll;

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.position,
            self.total_snapshots().max(1),
            self.interpretation
                .history
                .as_ref()
                .is_some_and(|history| history.is_truncated()),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => self.step_backward(),
            KeyCode::Right => self.step_forward(),
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Memory => {
                    self.memory_scroll.offset = self.memory_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Terminal => {
                    self.terminal_scroll = self.terminal_scroll.saturating_sub(1);
                }
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Memory => {
                    self.memory_scroll.offset = self.memory_scroll.offset.saturating_add(1);
                }
                FocusedPane::Terminal => {
                    self.terminal_scroll = self.terminal_scroll.saturating_add(1);
                }
                FocusedPane::Diagnostics => {
                    self.diagnostics_scroll = self.diagnostics_scroll.saturating_add(1);
                }
            },
            KeyCode::Enter => {
                self.jump_to(self.total_snapshots().saturating_sub(1));
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.jump_to(0);
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn jump_to(&mut self, position: usize) {
        self.position = position;
        self.memory_scroll.follow_pointer = true;
        // Auto-scroll terminal to bottom
        self.terminal_scroll = usize::MAX;
    }

    /// Step forward in the history
    pub fn step_forward(&mut self) {
        if self.position + 1 < self.total_snapshots() {
            self.jump_to(self.position + 1);
            self.status_message = "Stepped forward".to_string();
        } else {
            self.status_message = "Cannot step forward: at the end of the history".to_string();
        }
    }

    /// Step backward in the history
    pub fn step_backward(&mut self) {
        if self.position > 0 {
            self.jump_to(self.position - 1);
            self.status_message = "Stepped backward".to_string();
        } else {
            self.status_message = "Cannot step backward: at the start of the history".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{interpret, interpret_with_history};
    use crate::terminal::MockTerminal;

    fn app(source: &str, memory_size: usize) -> App {
        let mut terminal = MockTerminal::new();
        let interpretation =
            interpret_with_history(source, memory_size, true, &mut terminal, 1024 * 1024);
        App::new(interpretation, source.to_string())
    }

    #[test]
    fn test_stepping_stays_in_range() {
        let mut app = app("+ +", 1);
        assert_eq!(app.total_snapshots(), 3);

        app.step_backward();
        assert_eq!(app.position, 0);

        app.step_forward();
        app.step_forward();
        app.step_forward();
        assert_eq!(app.position, 2);
        assert!(app.status_message.starts_with("Cannot step forward"));
    }

    #[test]
    fn test_output_follows_selected_step() {
        let mut app = app("'a\" 'b\"", 1);

        assert_eq!(app.visible_output(), "");
        app.step_forward();
        assert_eq!(app.visible_output(), "a");
        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.visible_output(), "ab");
    }

    #[test]
    fn test_runtime_diagnostics_follow_selected_step() {
        let mut app = app("< $", 1);

        // The lexer diagnostic is always shown
        assert_eq!(app.visible_diagnostics().len(), 1);
        app.step_forward();
        assert_eq!(app.visible_diagnostics().len(), 2);
        app.handle_key_event(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(app.position, 0);
    }

    #[test]
    fn test_without_history_shows_final_state() {
        let mut terminal = MockTerminal::new();
        let interpretation = interpret("+++", 1, true, &mut terminal);
        let app = App::new(interpretation, "+++".to_string());

        assert_eq!(app.total_snapshots(), 0);
        assert!(app.current_snapshot().is_none());
        assert_eq!(app.current_memory().0.get(0), Some(crate::memory::value::Cell::Int(3)));
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app("+", 1);
        for _ in 0..4 {
            app.handle_key_event(KeyEvent::from(KeyCode::Tab));
        }
        assert_eq!(app.focused_pane, FocusedPane::Source);
    }
}
