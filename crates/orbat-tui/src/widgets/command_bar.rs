//! Vim-style command bar: a single-line overlay at the bottom of the screen.
//!
//! Opened with `:` from any pane except the query bar. `Enter` and `Escape`
//! are handled by the app shell, which parses the text with
//! [`Command::parse`](crate::commands::Command::parse).

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::input::LineInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

#[derive(Debug, Default)]
pub struct CommandBarState {
    /// The text typed after the `:` prefix.
    pub input: LineInput,
    /// Message from the last failed command; cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    pub fn clear(&mut self) {
        self.input.clear();
        self.error = None;
    }

    pub fn handle(&mut self, event: &AppEvent) {
        self.error = None;
        self.input.edit(event);
    }

    /// Terminal column of the text cursor; the `:` glyph takes the first cell.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        (area.x + 1 + self.input.cursor_chars()).min(area.right().saturating_sub(1))
    }
}

/// Single-row overlay showing `:<input>` or the last error.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = match &self.state.error {
            Some(err) => Line::from(Span::styled(
                format!("E  {err}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            None => Line::from(vec![
                Span::styled(":", self.theme.border_command_bar.add_modifier(Modifier::BOLD)),
                Span::raw(self.state.input.text()),
            ]),
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}
