//! File logging.
//!
//! The TUI owns the terminal, so log lines go to a daily file under
//! `$KEEPSAKE_HOME/logs`. `KEEPSAKE_LOG` takes an `EnvFilter` directive.

use std::fs;

use anyhow::{Context, Result};
use keepsake_core::config::paths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const FILTER_ENV: &str = "KEEPSAKE_LOG";
const DEFAULT_FILTER: &str = "keepsake=info,keepsake_core=info,keepsake_tui=info";

/// Installs the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init() -> Result<WorkerGuard> {
    let dir = paths::logs_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&dir, "keepsake.log"));
    let filter =
        EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}
