//! Jumper popup: menu of top-level units for quick navigation.
//!
//! Toggle with `m`. `↑`/`↓` pick an entry, `Enter` jumps the unit tree to
//! that root and closes the menu, `Escape` closes without moving.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::centered_rect;
use orbat_core::JumpTarget;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};

#[derive(Debug, Default)]
pub struct JumperState {
    pub open: bool,
    pub cursor: usize,
}

/// What the app shell should do after the jumper handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumperAction {
    None,
    Close,
    Jump(usize),
}

impl JumperState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.cursor = 0;
    }

    pub fn handle(&mut self, event: &AppEvent, targets: &[JumpTarget]) -> JumperAction {
        match event {
            AppEvent::TreeNav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                JumperAction::None
            }
            AppEvent::TreeNav(Direction::Down) => {
                if self.cursor + 1 < targets.len() {
                    self.cursor += 1;
                }
                JumperAction::None
            }
            AppEvent::Enter => {
                self.open = false;
                match targets.get(self.cursor) {
                    Some(t) => JumperAction::Jump(t.index),
                    None => JumperAction::Close,
                }
            }
            AppEvent::Escape | AppEvent::ToggleJumper | AppEvent::Quit => {
                self.open = false;
                JumperAction::Close
            }
            _ => JumperAction::None,
        }
    }
}

pub struct JumperPopup<'a> {
    state: &'a JumperState,
    targets: &'a [JumpTarget],
    theme: &'a Theme,
}

impl<'a> JumperPopup<'a> {
    pub fn new(state: &'a JumperState, targets: &'a [JumpTarget], theme: &'a Theme) -> Self {
        Self {
            state,
            targets,
            theme,
        }
    }
}

impl Widget for JumperPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (self.targets.len() as u16).saturating_add(2).max(3);
        let popup = centered_rect(48, height, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" jump to ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        if self.targets.is_empty() {
            buf.set_string(
                inner.x + 1,
                inner.y,
                "no units",
                Style::default().add_modifier(Modifier::DIM),
            );
            return;
        }

        let items: Vec<ListItem> = self
            .targets
            .iter()
            .map(|t| {
                let name = t.name.as_deref().unwrap_or("(unnamed)");
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<7}", t.anchor),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                    Span::styled(name.to_string(), self.theme.root_style(name)),
                ]))
            })
            .collect();

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}
