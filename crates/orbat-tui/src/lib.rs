//! orbat TUI: ratatui browser for a unit catalogue.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, AppState, Focus};

use orbat_core::{config::Config, Catalogue};
use std::path::PathBuf;

/// Start the TUI on an already-loaded catalogue.
///
/// `data_dir` is where `:side` looks for the other catalogue.
pub fn run(catalogue: Catalogue, data_dir: PathBuf, config: Config) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    tracing::info!(
        side = %catalogue.side,
        units = catalogue.units.len(),
        theme = %config.ui.theme,
        "starting tui"
    );
    App::new(catalogue, data_dir, config, theme).run()
}
