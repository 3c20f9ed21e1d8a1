//! Logging setup for PitchDesk.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::Result;

/// Build a log filter from the configured level.
///
/// The value is an `EnvFilter` directive string, so plain levels
/// ("debug") and per-target overrides ("pitchdesk=trace,sqlx=warn")
/// both work. Empty or unparseable values fall back to "info".
fn filter_for(level: &str) -> EnvFilter {
    let level = level.trim();
    if level.is_empty() {
        return EnvFilter::new("info");
    }
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging to the console and the configured log file.
///
/// The file layer writes without ANSI escapes so the log stays grep-able.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let log_path = Path::new(&config.file);
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)?;
    }
    let log_file = Arc::new(File::create(log_path)?);

    tracing_subscriber::registry()
        .with(filter_for(&config.level))
        .with(fmt::layer().with_target(true))
        .with(fmt::layer().with_writer(log_file).with_ansi(false))
        .init();

    Ok(())
}

/// Console-only logging, used when the log file cannot be created.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(fmt::layer().with_target(true))
        .init();
}
