//! File logging via `tracing`.
//!
//! The terminal belongs to the UI, so log lines go to `cadence.log` in the
//! configured directory (XDG state dir by default). `RUST_LOG` overrides the
//! configured level.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, default_state_dir};

pub const LOG_FILE: &str = "cadence.log";

/// Resolve the directory log files are written to.
pub fn log_dir(settings: &LogSettings) -> Option<PathBuf> {
    settings.dir.clone().or_else(default_state_dir)
}

/// Install the global subscriber. Returns the log file path on success.
pub fn init(settings: &LogSettings) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    let dir = log_dir(settings).ok_or("cannot determine a log directory (HOME is not set)")?;
    fs::create_dir_all(&dir)?;
    let path = dir.join(LOG_FILE);

    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()?;

    Ok(path)
}
