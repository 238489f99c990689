//! Timer phases and their configured durations.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Number of completed work phases that earn a long break.
pub const SESSIONS_PER_CYCLE: usize = 4;

/// The timer's current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Focused work
    Work,
    /// Break after a regular work phase
    ShortBreak,
    /// Break after every fourth work phase
    LongBreak,
}

impl Phase {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Check if this is a break phase.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Configured length of each phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    /// Work phase length
    pub work: Duration,
    /// Short break length
    pub short_break: Duration,
    /// Long break length
    pub long_break: Duration,
}

impl Durations {
    /// Create durations from whole seconds.
    #[must_use]
    pub const fn from_seconds(work: i64, short_break: i64, long_break: i64) -> Self {
        Self {
            work: Duration::seconds(work),
            short_break: Duration::seconds(short_break),
            long_break: Duration::seconds(long_break),
        }
    }

    /// Get the configured length of a phase.
    #[must_use]
    pub const fn of(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Work => self.work,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work: Duration::minutes(25),
            short_break: Duration::minutes(5),
            long_break: Duration::minutes(15),
        }
    }
}
