//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use crate::widgets::centered_rect;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("Tab", "Cycle focus: tree → detail → query"),
    ("/", "Focus the filter input"),
    ("Escape", "Return focus from the filter input"),
    ("Enter (filter)", "Apply the query now"),
    ("x", "Reset the query"),
    ("c", "Toggle compact / details"),
    ("m", "Jump to a top-level unit"),
    ("↑ k  /  ↓ j", "Navigate tree or scroll detail"),
    ("← h  /  → l", "Collapse / expand tree node"),
    ("Enter (tree)", "Toggle tree node"),
    ("PageUp  /  Ctrl+u", "Scroll detail up"),
    ("PageDown / Ctrl+d", "Scroll detail down"),
    (":", "Command line (:help lists commands)"),
    ("?", "Toggle this help popup"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(90, BINDINGS.len() as u16 + 4, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" orbat keybindings (? to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<22}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "  commands: q  help  compact  details  reset  jump <n>  side <ua|ru>  theme <name>",
            Style::default().add_modifier(Modifier::DIM),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
