//! # tick
//!
//! Task tracker binary: resolves command-line flags into one intent and runs
//! it against the local SQLite store.

#![deny(unsafe_code)]

mod cli;
mod dispatch;

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tick_issues::{GithubIssues, IssueError};
use tick_settings::TickSettings;
use tick_store::Database;
use tick_telemetry::{init_telemetry, parse_level, TelemetryConfig};
use tracing::Level;

use crate::cli::Cli;
use crate::dispatch::Dispatcher;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            let kind = e.downcast_ref::<IssueError>().map(IssueError::error_kind);
            tracing::debug!(error = %e, kind, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let loaded = tick_settings::load_settings().context("failed to load settings")?;
    init_logging(&loaded.settings);
    loaded.log_events();
    let settings = loaded.settings;

    let db_path = cli.db.clone().unwrap_or_else(|| settings.database.path.clone());

    let intent = match cli.into_intent(&settings.display.default_sort) {
        Ok(intent) => intent,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::from(2));
        }
    };

    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open database: {}", db_path.display()))?;
    let dispatcher = Dispatcher::new(
        db,
        Box::new(GithubIssues::new(settings.issues.endpoint.clone())),
        settings.issues.category.clone(),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runtime.block_on(dispatcher.run(intent, &mut out))?;
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn init_logging(settings: &TickSettings) {
    let level = parse_level(&settings.logging.level).unwrap_or(Level::WARN);
    let config = TelemetryConfig::default()
        .with_level(level)
        .with_json(settings.logging.json);
    init_telemetry(&config);
}
