//! Memory pane rendering

use crate::memory::value::Cell;
use crate::memory::Memory;
use crate::ui::panes::{clamp_scroll, pane_block};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Scroll state for the memory pane
#[derive(Debug, Default)]
pub struct MemoryScrollState {
    pub offset: usize,
    /// Scroll so the active cell is visible on the next render
    pub follow_pointer: bool,
}

fn cell_style(cell: Cell) -> Style {
    match cell {
        Cell::Int(0) => Style::default().fg(DEFAULT_THEME.comment),
        Cell::Int(_) => Style::default().fg(DEFAULT_THEME.number),
        Cell::Char(_) => Style::default().fg(DEFAULT_THEME.string),
    }
}

/// One row per cell: index, value and, for characters, the code point
fn cell_line(index: usize, cell: Cell, is_active: bool) -> Line<'static> {
    let marker = if is_active { "▶" } else { " " };
    let mut spans = vec![
        Span::styled(
            format!("{} {:>5} ", marker, index),
            Style::default().fg(if is_active {
                DEFAULT_THEME.secondary
            } else {
                DEFAULT_THEME.comment
            }),
        ),
        Span::styled(cell.to_string(), cell_style(cell)),
    ];
    if let Cell::Char(_) = cell {
        spans.push(Span::styled(
            format!("  ({})", cell.code()),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }

    Line::from(spans)
}

/// Render the memory pane
pub fn render_memory_pane(
    frame: &mut Frame,
    area: Rect,
    memory: &Memory,
    pointer: usize,
    is_focused: bool,
    scroll_state: &mut MemoryScrollState,
) {
    let title = format!(" Memory ({} cells, pointer {}) ", memory.len(), pointer);
    let block = pane_block(&title, is_focused);

    if memory.is_empty() {
        let paragraph = Paragraph::new("(no cells)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if scroll_state.follow_pointer {
        if pointer < scroll_state.offset {
            scroll_state.offset = pointer;
        } else if pointer >= scroll_state.offset + visible_height {
            scroll_state.offset = pointer + 1 - visible_height;
        }
        scroll_state.follow_pointer = false;
    }
    clamp_scroll(&mut scroll_state.offset, memory.len(), visible_height);

    let items: Vec<ListItem> = memory
        .cells()
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(index, &cell)| {
            let item = ListItem::new(cell_line(index, cell, index == pointer));
            if index == pointer {
                item.style(
                    Style::default()
                        .bg(DEFAULT_THEME.pointer_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
