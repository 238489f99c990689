//! Events emitted by the timer and the observer contract.

use serde::{Deserialize, Serialize};

/// A state change reported to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    /// Emitted on every tick and reset with the remaining time as `mm:ss`.
    Tick { remaining: String },
    /// A work phase ended and a break began.
    RestStarted { long: bool },
    /// A break ended and a new work phase began.
    WorkStarted,
    /// The work phase reached the alarm offset.
    Alarm { minutes: i64, seconds: i64 },
}

impl TimerEvent {
    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Tick { .. } => "tick",
            Self::RestStarted { .. } => "rest_started",
            Self::WorkStarted => "work_started",
            Self::Alarm { .. } => "alarm",
        }
    }
}

/// Receives timer events synchronously, in registration order.
#[cfg_attr(test, mockall::automock)]
pub trait TimerObserver {
    /// Handle one event.
    fn notify(&mut self, event: &TimerEvent);
}

impl<F> TimerObserver for F
where
    F: FnMut(&TimerEvent),
{
    fn notify(&mut self, event: &TimerEvent) {
        self(event);
    }
}
