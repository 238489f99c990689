use colored::Colorize;

use crate::timer::{TimerEvent, SESSIONS_PER_CYCLE};

const ORDINALS: [&str; SESSIONS_PER_CYCLE] = ["First", "Second", "Third", "Fourth"];

/// Label for the work session in progress, e.g. "Second Pomodoro".
#[must_use]
pub fn session_label(session_count: usize) -> String {
    format!("{} Pomodoro", ORDINALS[session_count % SESSIONS_PER_CYCLE])
}

/// Notification text for an alarm.
#[must_use]
pub fn alarm_message(minutes: i64, seconds: i64) -> String {
    format!("🔔 {minutes} minute(s) and {seconds} second(s) left!")
}

/// Title of the break overlay.
#[must_use]
pub const fn break_title(long: bool) -> &'static str {
    if long {
        "Long Break"
    } else {
        "Short Break"
    }
}

/// Format an event for the terminal.
///
/// `session_count` is the timer's counter after the event was emitted.
#[must_use]
pub fn format_event_pretty(event: &TimerEvent, session_count: usize) -> String {
    match event {
        TimerEvent::Tick { remaining } => format!("  {}", remaining.bold()),
        TimerEvent::RestStarted { long } => {
            format!("☕ {} started", break_title(*long)).cyan().to_string()
        }
        TimerEvent::WorkStarted => format!("🎯 {} started", session_label(session_count))
            .green()
            .to_string(),
        TimerEvent::Alarm { minutes, seconds } => {
            alarm_message(*minutes, *seconds).yellow().to_string()
        }
    }
}
