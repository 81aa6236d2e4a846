//! Diagnostic logging.
//!
//! The terminal belongs to the TUI while the report is open, so log records go
//! to `codesense.log` inside the state directory instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Env var that overrides the configured filter.
pub const LOG_ENV: &str = "CODESENSE_LOG";

/// Installs the global `tracing` subscriber writing to `path`.
///
/// `default_filter` applies when [`LOG_ENV`] is unset or invalid. Calling this
/// twice is harmless; the second subscriber is ignored.
///
/// # Errors
///
/// Returns `Err` if the log file cannot be opened for appending.
pub fn init(path: &Path, default_filter: &str) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
