use clap::Parser;
use orbat::headless::{self, HeadlessArgs};
use orbat_core::{config::Config, Side};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orbat", about = "Browse and filter order-of-battle unit catalogues")]
struct Cli {
    /// Catalogue to open: ua or ru. Defaults to `data.side` from the config.
    #[arg(long)]
    side: Option<Side>,

    /// Directory holding ua.json / ru.json. Defaults to `data.dir` from the config.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Load this catalogue file instead of looking one up by side.
    #[arg(long)]
    catalogue: Option<PathBuf>,

    /// Run one filter pass, print the outcome as JSON and exit.
    #[arg(long)]
    query: Option<String>,

    /// Headless only: details mode (no placeholder patches).
    #[arg(long)]
    details: bool,

    /// Headless only: pretty-print the JSON.
    #[arg(long)]
    pretty: bool,

    /// Write debug logs to /tmp/orbat-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/orbat-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("orbat debug log started, tail -f /tmp/orbat-debug.log");
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::defaults()
    });
    let side = cli.side.unwrap_or(config.data.side);
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.dir.clone());

    if let Some(query) = cli.query {
        let args = HeadlessArgs {
            side,
            data_dir,
            catalogue: cli.catalogue,
            query,
            details: cli.details,
            pretty: cli.pretty,
        };
        return headless::run(&args, &mut std::io::stdout().lock());
    }

    let catalogue = headless::load_catalogue(side, &data_dir, cli.catalogue.as_deref())?;
    orbat_tui::run(catalogue, data_dir, config)
}
