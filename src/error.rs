//! Error types for the pomodoro timer.

use thiserror::Error;

use crate::timer::TimerError;

/// Top-level error for the application.
#[derive(Debug, Error)]
pub enum PomodoroError {
    /// The timer rejected an operation.
    #[error(transparent)]
    Timer(#[from] TimerError),

    /// Configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal setup, drawing, or input failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
