//! markban-restructure - Bookmark Kanban migration tool
//!
//! Restructures a taxonomy-based bookmark tree (folders per content
//! source) in a places database working copy into a status-based Kanban
//! layout, enforcing a WIP limit on the active folder.
//!
//! Always point this at a copy of places.sqlite, never the live profile.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use markban_common::config::load_config;
use markban_common::db::open_store;
use markban_restructure::{ConsoleConfirm, Mode, Restructure, RunOutcome};
use tracing::{error, info};

/// Command-line arguments for markban-restructure
#[derive(Parser, Debug)]
#[command(name = "markban-restructure")]
#[command(about = "Restructure a bookmark store into a Kanban layout with a WIP limit")]
#[command(version)]
struct Args {
    /// Path to the places database working copy (overrides config file)
    #[arg(long, env = "MARKBAN_DB")]
    db: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(long, env = "MARKBAN_CONFIG")]
    config: Option<PathBuf>,

    /// Override the work-in-progress limit for the active folder
    #[arg(long)]
    wip_limit: Option<usize>,

    /// Commit without prompting once validation passes
    #[arg(long, conflicts_with = "dry_run")]
    commit: bool,

    /// Run everything, then roll back unconditionally
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn mode(&self) -> Mode {
        if self.dry_run {
            Mode::DryRun
        } else if self.commit {
            Mode::Commit
        } else {
            Mode::Interactive
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mode = args.mode();
    info!(
        "Starting markban-restructure v{} ({} mode)",
        env!("CARGO_PKG_VERSION"),
        match mode {
            Mode::Interactive => "interactive",
            Mode::Commit => "auto-commit",
            Mode::DryRun => "dry-run",
        }
    );

    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(limit) = args.wip_limit {
        config.wip_limit = limit;
    }
    info!("Store: {}", config.db_path.display());

    let mut conn = open_store(&config.db_path)
        .await
        .context("Failed to open store")?;

    let engine = Restructure::new(config);
    let summary = engine
        .run(&mut conn, mode, &mut ConsoleConfirm)
        .await
        .context("Migration failed")?;

    match summary.outcome {
        RunOutcome::Committed => info!(
            "Done: {} moved ({} active, {} queued, {} completed)",
            summary.moved(),
            summary.active,
            summary.queued,
            summary.completed
        ),
        RunOutcome::RolledBack => info!(
            "No changes made; {} entries would have moved",
            summary.moved()
        ),
    }

    Ok(())
}
