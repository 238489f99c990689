//! Output formatting.
//!
//! This module provides formatters for displaying timer events in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::PomodoroError;
use crate::timer::{TimerEvent, TimerState};

pub use json::*;
pub use pretty::*;

/// Format an event based on output format
///
/// # Errors
///
/// Returns `PomodoroError::Parse` if JSON serialization fails.
pub fn format_event(
    event: &TimerEvent,
    state: &TimerState,
    format: OutputFormat,
) -> Result<String, PomodoroError> {
    match format {
        OutputFormat::Pretty => Ok(format_event_pretty(event, state.session_count)),
        OutputFormat::Json => format_event_json(event, state),
    }
}
