//! Ratatui widgets for the orbat TUI.

pub mod command_bar;
pub mod detail;
pub mod header;
pub mod help;
pub mod input;
pub mod jumper;
pub mod query_bar;
pub mod unit_tree;

use orbat_core::Matcher;
use ratatui::{style::Style, text::Span};

/// Split `text` into spans, styling the parts found by `matcher` with `hl`.
///
/// Matching runs on the lower-cased text. When lower-casing changes byte
/// offsets the text is returned unhighlighted.
pub fn highlighted(text: &str, matcher: Option<&Matcher>, base: Style, hl: Style) -> Vec<Span<'static>> {
    let Some(matcher) = matcher else {
        return vec![Span::styled(text.to_string(), base)];
    };
    let lowered = text.to_lowercase();
    if lowered.len() != text.len() {
        return vec![Span::styled(text.to_string(), base)];
    }

    let mut spans = Vec::new();
    let mut pos = 0;
    for r in matcher.spans(&lowered) {
        if !text.is_char_boundary(r.start) || !text.is_char_boundary(r.end) {
            continue;
        }
        if r.start > pos {
            spans.push(Span::styled(text[pos..r.start].to_string(), base));
        }
        spans.push(Span::styled(text[r.start..r.end].to_string(), base.patch(hl)));
        pos = r.end;
    }
    if pos < text.len() {
        spans.push(Span::styled(text[pos..].to_string(), base));
    }
    spans
}

/// Centre a `width` × `height` rectangle inside `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: ratatui::layout::Rect) -> ratatui::layout::Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    ratatui::layout::Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
