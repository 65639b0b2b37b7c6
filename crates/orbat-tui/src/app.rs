//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. All key handling lives on
//! [`AppState`] so it can be exercised without a terminal.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, KeyMode},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        detail::{Detail, DetailState},
        header::Header,
        help::HelpPopup,
        jumper::{JumperAction, JumperPopup, JumperState},
        query_bar::{QueryBar, QueryBarState},
        unit_tree::{unit_at, UnitTree, UnitTreeState},
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use orbat_core::{
    config::Config, filter_units, Catalogue, FilterOptions, FilterOutcome, Matcher, Query, Side,
    Unit,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Detail,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    /// The loaded catalogue; never mutated by filtering.
    pub catalogue: Catalogue,
    /// Directory `:side` loads catalogues from.
    pub data_dir: PathBuf,
    /// Result of the last filter pass.
    pub outcome: FilterOutcome,
    /// The query the current outcome was produced from.
    pub applied: Query,
    /// Compiled matcher for highlighting; `None` outside search mode.
    pub matcher: Option<Matcher>,
    pub compact: bool,
    pub debounce: Duration,
    pub tree: UnitTreeState,
    pub detail: DetailState,
    pub query_bar: QueryBarState,
    pub jumper: JumperState,
    pub command_bar: CommandBarState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub quit: bool,
}

impl AppState {
    pub fn new(catalogue: Catalogue, data_dir: PathBuf, config: Config, theme: Theme) -> Self {
        let compact = config.ui.compact;
        let mut state = AppState {
            catalogue,
            data_dir,
            outcome: FilterOutcome::default(),
            applied: Query::default(),
            matcher: None,
            compact,
            debounce: Duration::from_millis(config.search.debounce_ms),
            tree: UnitTreeState::default(),
            detail: DetailState::default(),
            query_bar: QueryBarState::default(),
            jumper: JumperState::default(),
            command_bar: CommandBarState::default(),
            focus: Focus::Tree,
            prev_focus: Focus::Tree,
            theme,
            config,
            show_help: false,
            quit: false,
        };
        state.refilter();
        state
    }

    /// Re-run the filter over the catalogue with the applied query and the
    /// current display mode, then rebuild the tree from the result.
    pub fn refilter(&mut self) {
        let options = FilterOptions {
            compact: self.compact,
        };
        self.outcome = filter_units(&self.catalogue.units, &self.applied, options);
        self.matcher = self
            .outcome
            .search_mode
            .then(|| self.applied.matcher());
        self.tree = UnitTreeState::from_units(&self.outcome.units, self.matcher.as_ref());
        self.detail.reset();
        self.jumper.open = false;
    }

    /// Parse the query bar text and filter with it.
    pub fn apply_query(&mut self) {
        self.query_bar.flush();
        self.applied = Query::parse(self.query_bar.text());
        tracing::debug!(tokens = ?self.applied.tokens(), "query applied");
        self.refilter();
    }

    /// Clear the query bar and leave search mode.
    pub fn reset_query(&mut self) {
        tracing::debug!("query reset");
        self.query_bar.clear();
        self.applied = Query::default();
        self.refilter();
    }

    pub fn set_compact(&mut self, compact: bool) {
        if self.compact != compact {
            tracing::debug!(compact, "display mode changed");
            self.compact = compact;
            self.refilter();
        }
    }

    /// Move the tree cursor to the root with jump index `index`.
    pub fn jump_to(&mut self, index: usize) -> bool {
        let moved = self.tree.select_root(index);
        if moved {
            self.detail.reset();
            self.focus = Focus::Tree;
        }
        moved
    }

    /// Load the catalogue for `side` from the data directory and re-filter.
    /// The current catalogue is kept when loading fails.
    pub fn switch_side(&mut self, side: Side) -> anyhow::Result<()> {
        let catalogue = Catalogue::load(side, &self.data_dir)?;
        tracing::debug!(%side, units = catalogue.units.len(), "catalogue switched");
        self.catalogue = catalogue;
        self.refilter();
        Ok(())
    }

    /// The unit under the tree cursor, resolved against the filtered roots.
    pub fn focused_unit(&self) -> Option<&Unit> {
        let path = self.tree.cursor_path()?;
        unit_at(&self.outcome.units, &path)
    }

    /// Apply a debounced query edit once its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.query_bar.take_due(now) {
            self.apply_query();
        }
    }

    pub fn handle(&mut self, event: AppEvent, now: Instant) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        if self.jumper.open {
            match self.jumper.handle(&event, &self.outcome.jump_targets) {
                JumperAction::Jump(index) => {
                    self.jump_to(index);
                }
                JumperAction::Close | JumperAction::None => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            self.handle_command(event);
            return;
        }

        match event {
            AppEvent::Char('?') if self.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Escape => {
                if self.focus == Focus::QueryBar {
                    tracing::debug!("focus: QueryBar -> Tree");
                    self.focus = Focus::Tree;
                }
            }

            // Tab-cycle focus: Tree → Detail → QueryBar → Tree
            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Tree => Focus::Detail,
                    Focus::Detail => Focus::QueryBar,
                    Focus::QueryBar | Focus::Command => Focus::Tree,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> QueryBar");
                self.focus = Focus::QueryBar;
            }

            AppEvent::ToggleCompact => self.set_compact(!self.compact),
            AppEvent::ResetQuery => self.reset_query(),
            AppEvent::ToggleJumper => {
                tracing::debug!("jumper opened");
                self.jumper.toggle();
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other, now),
        }
    }

    fn handle_command(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => {
                let input = self.command_bar.input.text().to_string();
                match Command::parse(&input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                        if let Err(msg) = execute_command(self, cmd) {
                            tracing::warn!(error = %msg, "command failed");
                            self.prev_focus = self.focus;
                            self.focus = Focus::Command;
                            self.command_bar.error = Some(msg);
                        }
                    }
                    Err(msg) if msg.is_empty() => {
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    Err(msg) => {
                        self.command_bar.error = Some(msg);
                    }
                }
            }
            other => self.command_bar.handle(&other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent, now: Instant) {
        match self.focus {
            Focus::Tree => {
                let before = self.tree.cursor_path();
                self.tree.handle(&event);
                if self.tree.cursor_path() != before {
                    self.detail.reset();
                }
            }
            Focus::Detail => self.detail.handle(&event),
            Focus::QueryBar => match event {
                AppEvent::Enter => self.apply_query(),
                other => {
                    if self.query_bar.handle(&other) {
                        self.query_bar.arm(now, self.debounce);
                    }
                }
            },
            Focus::Command => {} // handled before dispatch, should not reach here
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(catalogue: Catalogue, data_dir: PathBuf, config: Config, theme: Theme) -> Self {
        App {
            state: AppState::new(catalogue, data_dir, config, theme),
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Press => {}
                    raw => {
                        if let Some(ev) = event::to_app_event(raw, key_mode(self.state.focus)) {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "event");
                            self.state.handle(ev, Instant::now());
                        }
                    }
                }
            }

            self.state.tick(Instant::now());
        }
        Ok(())
    }
}

/// Text inputs take letters literally.
fn key_mode(focus: Focus) -> KeyMode {
    match focus {
        Focus::QueryBar | Focus::Command => KeyMode::Insert,
        Focus::Tree | Focus::Detail => KeyMode::Normal,
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line header | body | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    let pct = state.config.ui.tree_pane_width_pct.min(100);
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
        .split(vert[1]);

    let matcher = state.matcher.as_ref();

    frame.render_widget(
        Header::new(
            &state.catalogue.title,
            state.compact,
            state.outcome.search_mode,
            state.outcome.units.len(),
            &state.theme,
        ),
        vert[0],
    );
    frame.render_widget(
        UnitTree::new(&state.tree, state.focus == Focus::Tree, matcher, &state.theme),
        horiz[0],
    );
    frame.render_widget(
        Detail::new(
            &state.detail,
            state.focused_unit(),
            state.compact,
            matcher,
            state.focus == Focus::Detail,
            &state.theme,
        ),
        horiz[1],
    );
    frame.render_widget(
        QueryBar::new(
            &state.query_bar,
            state.focus == Focus::QueryBar,
            state.outcome.search_mode,
            &state.theme,
        ),
        vert[2],
    );

    if state.jumper.open {
        frame.render_widget(
            JumperPopup::new(&state.jumper, &state.outcome.jump_targets, &state.theme),
            area,
        );
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&state.query_bar, true, state.outcome.search_mode, &state.theme);
        let (cx, cy) = qb.cursor_position(vert[2]);
        frame.set_cursor_position((cx, cy));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
