//! Header widget: the 1-line strip at the top of the screen.
//!
//! Shows the catalogue title, the compact/details toggle label, the number of
//! visible roots and, on the right edge, keybinding hints.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Label of the display toggle: names the mode a press would switch *to*.
pub fn compact_toggle_label(compact: bool) -> &'static str {
    if compact {
        "Details"
    } else {
        "Compact"
    }
}

pub struct Header<'a> {
    title: &'a str,
    compact: bool,
    search_mode: bool,
    roots: usize,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, compact: bool, search_mode: bool, roots: usize, theme: &'a Theme) -> Self {
        Self {
            title,
            compact,
            search_mode,
            roots,
            theme,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mode = if self.search_mode { "filtered" } else { "all" };
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.title),
                self.theme.border_focused.add_modifier(Modifier::REVERSED),
            ),
            Span::raw(format!(" [ {} ] ", compact_toggle_label(self.compact))),
            Span::styled(
                format!(" {} {} ", self.roots, mode),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        // Keybinding hints at the right edge
        let hint = " m:jump  c:mode  q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
