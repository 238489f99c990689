//! Tracing setup.
//!
//! The terminal UI owns stdout and stderr, so it only logs when a log file
//! is configured. Headless commands log to stderr.

use std::fs::OpenOptions;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;
use crate::error::PomodoroError;

/// Where log output should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Only the configured file, if any.
    FileOnly,
    /// The configured file, or stderr when no file is set.
    FileOrStderr,
}

fn filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the configured log file cannot be opened.
pub fn init(config: &LogConfig, target: LogTarget) -> Result<(), PomodoroError> {
    if let Some(path) = &config.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                PomodoroError::Config(format!("Failed to open log file {}: {e}", path.display()))
            })?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_level(true);

        // A subscriber may already be installed when embedded in tests
        let _ = tracing_subscriber::registry()
            .with(filter(config))
            .with(file_layer)
            .try_init();
        return Ok(());
    }

    if target == LogTarget::FileOrStderr {
        let _ = tracing_subscriber::registry()
            .with(filter(config))
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init();
    }

    Ok(())
}
