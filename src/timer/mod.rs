//! Pomodoro timer core.
//!
//! Provides the work/break state machine and its event contract:
//! - Work, short break and long break phases
//! - Completed-session counting with a long break every fourth session
//! - Pre-expiry alarm at a configurable offset
//! - Fixed-rate tick scheduling

pub mod event;
pub mod format;
pub mod phase;
pub mod pomodoro;
pub mod scheduler;

pub use event::{TimerEvent, TimerObserver};
pub use format::{format_human, format_mmss, parse_duration, split_minutes_seconds};
pub use phase::{Durations, Phase, SESSIONS_PER_CYCLE};
pub use pomodoro::{PomodoroTimer, TimerError, TimerState, DEFAULT_PERIOD};
pub use scheduler::Ticker;
