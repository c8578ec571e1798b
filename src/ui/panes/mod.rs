//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and current word indicator
//! - [`memory`]: Cell array with the active cell highlighted
//! - [`terminal`]: Program output up to the selected step
//! - [`diagnostics`]: Lexer, parser and runtime diagnostics
//! - [`status`]: Status bar with keybindings and execution state
//!
//! Each pane module exports a primary `render_*` function taking the frame,
//! its area, the data to draw and its scroll state.

pub mod diagnostics;
pub mod memory;
pub mod source;
pub mod status;
pub mod terminal;

pub use diagnostics::render_diagnostics_pane;
pub use memory::{render_memory_pane, MemoryScrollState};
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use terminal::render_terminal_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus colour applied
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp a scroll offset so the last page stays full
pub(crate) fn clamp_scroll(offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        *offset = (*offset).min(total_items - visible_height);
    } else {
        *offset = 0;
    }
}
