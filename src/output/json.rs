//! JSON output formatting.

use serde::Serialize;
use serde_json::json;

use crate::error::PomodoroError;
use crate::timer::{TimerEvent, TimerState};

/// Serialize any value as pretty JSON.
///
/// # Errors
///
/// Returns `PomodoroError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PomodoroError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Format an event and the state it left behind as a single JSON line.
///
/// # Errors
///
/// Returns `PomodoroError::Parse` if JSON serialization fails.
pub fn format_event_json(event: &TimerEvent, state: &TimerState) -> Result<String, PomodoroError> {
    let output = json!({
        "event": event,
        "state": state,
    });
    Ok(serde_json::to_string(&output)?)
}
