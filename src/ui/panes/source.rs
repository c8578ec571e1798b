//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the WTFZOMFG
//! program with per-word highlighting and the word about to execute.
//!
//! # Rendering
//!
//! Highlighting follows the first character of each word, plus the open
//! literal (comment or print string) carried from earlier words, so
//! multi-word and multi-line literals keep their colour without running
//! the real lexer.

use crate::parser::ast::SourceLocation;
use crate::parser::lexer::Command;
use crate::ui::panes::pane_block;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Literal still open at the end of the previous word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenLiteral {
    None,
    Comment,
    Print,
}

fn command_style(command: Command) -> Style {
    match command {
        Command::LabelGoto
        | Command::LabelDeclare
        | Command::LabelGotoNonzero
        | Command::LabelGotoZero
        | Command::LoopStart
        | Command::LoopEnd
        | Command::IfStart
        | Command::IfEnd => Style::default()
            .fg(DEFAULT_THEME.control)
            .add_modifier(Modifier::BOLD),
        Command::ScanAscii
        | Command::ScanDecimal
        | Command::PrintCellAscii
        | Command::PrintCellDecimal
        | Command::PrintProgramState => Style::default().fg(DEFAULT_THEME.io),
        Command::PrintCharacter | Command::PrintUntil | Command::PrintStop => {
            Style::default().fg(DEFAULT_THEME.string)
        }
        Command::Comment | Command::CommentStart | Command::CommentEnd => {
            Style::default().fg(DEFAULT_THEME.comment)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Style one word and update the open literal
fn word_style(word: &str, literal: &mut OpenLiteral, line_comment: &mut bool) -> Style {
    if *line_comment {
        return Style::default().fg(DEFAULT_THEME.comment);
    }

    match *literal {
        OpenLiteral::Comment => {
            if word.ends_with(']') {
                *literal = OpenLiteral::None;
            }
            return Style::default().fg(DEFAULT_THEME.comment);
        }
        OpenLiteral::Print => {
            if word.ends_with('"') {
                *literal = OpenLiteral::None;
            }
            return Style::default().fg(DEFAULT_THEME.string);
        }
        OpenLiteral::None => {}
    }

    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return Style::default();
    };
    let rest = chars.as_str();

    match Command::from_symbol(first) {
        Some(Command::Comment) => {
            *line_comment = true;
            Style::default().fg(DEFAULT_THEME.comment)
        }
        Some(Command::CommentStart) => {
            if !rest.ends_with(']') {
                *literal = OpenLiteral::Comment;
            }
            Style::default().fg(DEFAULT_THEME.comment)
        }
        Some(Command::PrintUntil) => {
            if !rest.ends_with('"') {
                *literal = OpenLiteral::Print;
            }
            Style::default().fg(DEFAULT_THEME.string)
        }
        Some(command) if command.takes_payload() && rest.parse::<i64>().is_ok() => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        Some(command) => command_style(command),
        None => Style::default().fg(DEFAULT_THEME.error),
    }
}

/// Split a line into whitespace runs and words, highlighting `current_word` (1-based)
fn highlight_line<'a>(
    line: &'a str,
    literal: &mut OpenLiteral,
    current_word: Option<usize>,
) -> Line<'a> {
    let mut spans = Vec::new();
    let mut line_comment = false;
    let mut word_nr = 0;
    let mut rest = line;

    while !rest.is_empty() {
        let space_len = rest.len() - rest.trim_start().len();
        if space_len > 0 {
            spans.push(Span::raw(&rest[..space_len]));
            rest = &rest[space_len..];
            continue;
        }

        let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = &rest[..word_len];
        word_nr += 1;

        let mut style = word_style(word, literal, &mut line_comment);
        if current_word == Some(word_nr) {
            style = style
                .bg(DEFAULT_THEME.secondary)
                .fg(ratatui::style::Color::Black)
                .add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(word, style));
        rest = &rest[word_len..];
    }

    Line::from(spans)
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current: Option<SourceLocation>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = pane_block(" Source Code ", is_focused);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let current_line = current.map_or(0, |location| location.line);

    // Account for borders (2), min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);
        super::clamp_scroll(&mut scroll_state.offset, total_lines, visible_height);
    }

    // Literal state has to be carried through the lines scrolled past
    let mut literal = OpenLiteral::None;
    let mut visible_lines = Vec::with_capacity(visible_height);
    for (idx, line) in lines.iter().enumerate() {
        if idx >= scroll_state.offset + visible_height {
            break;
        }
        let line_num = idx + 1;
        let is_current = line_num == current_line;
        let current_word = current.filter(|_| is_current).map(|location| location.word);
        let mut content = highlight_line(line, &mut literal, current_word);

        if idx < scroll_state.offset {
            continue;
        }

        let num_style = if is_current {
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.comment)
        };
        if is_current {
            for span in &mut content.spans {
                if span.style.bg.is_none() {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
            }
        }

        let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
        spans.extend(content.spans);
        visible_lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
