//! Detail pane: the scrollable description of the focused unit on the right.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Scroll up one line |
//! | `↓` / `j` | Scroll down one line |
//! | `PageUp` / `Ctrl+u` | Scroll up one page |
//! | `PageDown` / `Ctrl+d` | Scroll down one page |
//!
//! In compact mode only the name and patch thumbnails are listed; detail
//! mode adds the description, tags and full-size image paths.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::highlighted;
use orbat_core::{Matcher, Unit};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

const PAGE_STEP: u16 = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct DetailState {
    /// Lines scrolled off the top.
    pub scroll: u16,
    /// Line count of the last render so scrolling can stop at the end.
    last_len: Cell<u16>,
}

impl DetailState {
    /// Reset scrolling; call when the focused unit changes.
    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    fn max_scroll(&self) -> u16 {
        self.last_len.get().saturating_sub(1)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::TreeNav(Direction::Up) => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            AppEvent::TreeNav(Direction::Down) => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
            }
            AppEvent::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(PAGE_STEP);
            }
            AppEvent::ScrollDown => {
                self.scroll = (self.scroll + PAGE_STEP).min(self.max_scroll());
            }
            _ => return,
        }
        tracing::debug!(scroll = self.scroll, "detail: scrolled");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct Detail<'a> {
    state: &'a DetailState,
    unit: Option<&'a Unit>,
    compact: bool,
    matcher: Option<&'a Matcher>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Detail<'a> {
    pub fn new(
        state: &'a DetailState,
        unit: Option<&'a Unit>,
        compact: bool,
        matcher: Option<&'a Matcher>,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            unit,
            compact,
            matcher,
            focused,
            theme,
        }
    }

    /// Build the pane's text for `unit`.
    pub fn lines(&self, unit: &Unit) -> Vec<Line<'static>> {
        let theme = self.theme;
        let hl = theme.search_highlight;
        let mut lines = vec![Line::from(highlighted(
            unit.label(),
            self.matcher,
            theme.unit_name,
            hl,
        ))];

        if !self.compact {
            if let Some(meta) = &unit.meta {
                if let Some(description) = &meta.description {
                    lines.push(Line::default());
                    for para in description.lines() {
                        lines.push(Line::from(highlighted(
                            para,
                            self.matcher,
                            theme.meta_description,
                            hl,
                        )));
                    }
                }
                if let Some(tags) = &meta.tags {
                    lines.push(Line::default());
                    let mut spans = vec![Span::styled("tags: ", dim())];
                    spans.extend(highlighted(tags, self.matcher, theme.meta_tags, hl));
                    lines.push(Line::from(spans));
                }
            }
        }

        let patches = unit.patch_list();
        if !patches.is_empty() {
            lines.push(Line::default());
            for patch in patches {
                let (path, style) = if patch.is_placeholder() {
                    (patch.thumb.as_str(), theme.unit_placeholder)
                } else if self.compact {
                    (patch.thumb.as_str(), theme.unit_patch)
                } else {
                    (patch.full.as_str(), theme.unit_patch)
                };
                lines.push(Line::from(vec![
                    Span::styled("▣ ", style),
                    Span::styled(path.to_string(), style),
                ]));
            }
        }

        let children = unit.children().len();
        if children > 0 {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("{children} sub-unit{}", if children == 1 { "" } else { "s" }),
                dim(),
            )));
        }

        lines
    }
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

impl Widget for Detail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = if self.compact { "Unit" } else { "Unit details" };
        let block = Block::bordered().title(title).border_style(border_style);

        let Some(unit) = self.unit else {
            self.state.last_len.set(0);
            Paragraph::new(Line::from(Span::styled("nothing selected", dim())))
                .block(block)
                .render(area, buf);
            return;
        };

        let lines = self.lines(unit);
        self.state
            .last_len
            .set(u16::try_from(lines.len()).unwrap_or(u16::MAX));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.state.scroll, 0))
            .render(area, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
