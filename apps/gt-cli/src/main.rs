//! # gt-cli
//!
//! Command-line front end for the goal tracker.
//!
//! - `gt list` — show earned play time and all goals
//! - `gt add <title> [--reward N]` — add a goal
//! - `gt toggle <id>` / `gt delete <id>` — complete, un-complete or remove a goal
//! - `gt reset` / `gt balance` — reset or show the earned play time

mod commands;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use gt_goal::{FileAdapter, GoalStore, JsonlObserver, TrackerConfig};
use tracing_subscriber::EnvFilter;

/// Goal tracker — earn play time by finishing goals.
#[derive(Parser)]
#[command(name = "gt", version, about)]
struct Cli {
    /// Directory holding goal state and config.toml.
    #[arg(long, default_value = ".goals")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: commands::goal::GoalCommands,
}

/// Filter used when `RUST_LOG` is unset, empty or unparsable.
const DEFAULT_LOG_FILTER: &str = "gt_goal=warn,gt_cli=warn";

fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't mix with the rendered goal list.
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = TrackerConfig::load(&cli.data_dir)?;
    tracing::debug!("data dir: {}", config.data_dir.display());

    let mut store = GoalStore::load(FileAdapter::new(&config.data_dir));
    if let Some(log) = &config.activity_log {
        store.subscribe(Box::new(JsonlObserver::new(log)));
    }

    let stdout = io::stdout();
    commands::goal::execute(&cli.command, &mut store, &config, &mut stdout.lock())
}
