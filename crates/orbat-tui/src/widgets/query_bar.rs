//! Query bar widget: filter input at the bottom of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `TreeNav(Left)` / `TreeNav(Right)` move the cursor.
//!
//! # Debounce
//!
//! Every edit re-arms a deadline `debounce` after the keystroke. The app
//! shell polls [`QueryBarState::take_due`] each tick and applies the query
//! once the deadline has passed, so only the last edit of a burst triggers a
//! filter pass.

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::input::LineInput;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    /// The filter text typed by the user.
    pub input: LineInput,
    /// When the pending edit should be applied.
    pending: Option<Instant>,
}

impl QueryBarState {
    pub fn text(&self) -> &str {
        self.input.text()
    }

    /// Handle a key event from the app shell.
    ///
    /// Returns `true` when the query text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        let changed = self.input.edit(event);
        if changed {
            tracing::debug!(query = %self.input.text(), "query edited");
        }
        changed
    }

    /// Schedule the current text to be applied `debounce` after `now`.
    pub fn arm(&mut self, now: Instant, debounce: Duration) {
        self.pending = Some(now + debounce);
    }

    /// True once if a pending edit's deadline has passed; clears it.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending edit (the caller applies the text itself).
    pub fn flush(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Clear the text and any pending edit.
    pub fn clear(&mut self) {
        self.input.clear();
        self.pending = None;
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    /// Whether the applied query is non-empty; shows the reset hint.
    search_mode: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, focused: bool, search_mode: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            search_mode,
            theme,
        }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.state.input.cursor_chars();
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title("Filter Units")
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        // Split inner area: query text (fill) | reset hint (fixed width)
        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(12)])
            .split(inner);

        let query_line = if self.state.input.is_empty() && !self.focused {
            Line::from(Span::styled(
                "type a query (press /)",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.text())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let hint = if self.state.is_pending() {
            Span::styled("…", Style::default().add_modifier(Modifier::DIM))
        } else if self.search_mode {
            Span::styled("[×] x:reset", Style::default().add_modifier(Modifier::BOLD))
        } else {
            Span::raw("")
        };
        Paragraph::new(Line::from(hint)).render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
