//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event             | Modes          |
//! |-------------------------|-------------------|----------------|
//! | `Ctrl+c`                | `Quit`            | both           |
//! | `q`                     | `Quit`            | normal         |
//! | `Tab`                   | `FocusNext`       | both           |
//! | `/`                     | `QueryFocus`      | normal         |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`        | normal         |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`      | normal         |
//! | `c`                     | `ToggleCompact`   | normal         |
//! | `m`                     | `ToggleJumper`    | normal         |
//! | `x`                     | `ResetQuery`      | normal         |
//! | arrows                  | `TreeNav(_)`      | both           |
//! | `h` `j` `k` `l`         | `TreeNav(_)`      | normal         |
//! | printable char          | `Char(c)`         | both           |
//! | `Backspace` / `Enter`   | same name         | both           |
//! | `Esc`                   | `Escape`          | both           |
//! | terminal resize         | `Resize(w, h)`    | both           |
//!
//! In [`KeyMode::Insert`] (query bar or command bar focused) every letter is
//! typed as-is; only the "both" rows keep their binding.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cardinal direction for unit tree and detail pane navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
///
/// The App shell routes these to the widget that owns the current focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Tab-cycle focus between panes.
    FocusNext,
    QueryFocus,
    /// Page the detail pane.
    ScrollUp,
    ScrollDown,
    ToggleCompact,
    ToggleJumper,
    ResetQuery,
    /// Move in the tree or jumper; moves the text cursor in inputs.
    TreeNav(Direction),
    Char(char),
    Backspace,
    Enter,
    Resize(u16, u16),
    /// Close the active popup or leave the query bar.
    Escape,
}

/// Whether letters are shortcuts or text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    Normal,
    Insert,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`].
///
/// Returns `None` for mouse events, focus changes and unbound keys.
pub fn to_app_event(event: Event, mode: KeyMode) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => common_key(&key).or_else(|| match mode {
            KeyMode::Normal => shortcut(&key).or_else(|| typed(&key)),
            KeyMode::Insert => typed(&key),
        }),
        _ => None,
    }
}

/// Bindings shared by both modes.
fn common_key(key: &KeyEvent) -> Option<AppEvent> {
    let plain = key.modifiers == KeyModifiers::NONE;
    let ev = match key.code {
        KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => AppEvent::Quit,
        KeyCode::Tab if plain => AppEvent::FocusNext,
        KeyCode::Up => AppEvent::TreeNav(Direction::Up),
        KeyCode::Down => AppEvent::TreeNav(Direction::Down),
        KeyCode::Left => AppEvent::TreeNav(Direction::Left),
        KeyCode::Right => AppEvent::TreeNav(Direction::Right),
        KeyCode::Backspace if plain => AppEvent::Backspace,
        KeyCode::Enter if plain => AppEvent::Enter,
        KeyCode::Esc => AppEvent::Escape,
        _ => return None,
    };
    Some(ev)
}

/// Normal-mode shortcuts.
fn shortcut(key: &KeyEvent) -> Option<AppEvent> {
    if key.modifiers == KeyModifiers::CONTROL {
        return match key.code {
            KeyCode::Char('u') => Some(AppEvent::ScrollUp),
            KeyCode::Char('d') => Some(AppEvent::ScrollDown),
            _ => None,
        };
    }
    match key.code {
        KeyCode::PageUp => return Some(AppEvent::ScrollUp),
        KeyCode::PageDown => return Some(AppEvent::ScrollDown),
        _ => {}
    }
    if key.modifiers != KeyModifiers::NONE {
        return None;
    }
    let ev = match key.code {
        KeyCode::Char('q') => AppEvent::Quit,
        KeyCode::Char('/') => AppEvent::QueryFocus,
        KeyCode::Char('c') => AppEvent::ToggleCompact,
        KeyCode::Char('m') => AppEvent::ToggleJumper,
        KeyCode::Char('x') => AppEvent::ResetQuery,
        KeyCode::Char('k') => AppEvent::TreeNav(Direction::Up),
        KeyCode::Char('j') => AppEvent::TreeNav(Direction::Down),
        KeyCode::Char('h') => AppEvent::TreeNav(Direction::Left),
        KeyCode::Char('l') => AppEvent::TreeNav(Direction::Right),
        _ => return None,
    };
    Some(ev)
}

/// Printable characters, shifted or not.
fn typed(key: &KeyEvent) -> Option<AppEvent> {
    match key.code {
        KeyCode::Char(c)
            if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
        {
            Some(AppEvent::Char(c))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
