//! Configuration settings.
//!
//! Settings are read from `~/.pomodoro/config.yaml`. The file is never
//! written; edits made in the settings dialog last for the current process.

use std::path::PathBuf;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::PomodoroError;
use crate::timer::Durations;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Timer durations and tick rate.
    pub timer: TimerConfig,
    /// Presentation settings.
    pub ui: UiConfig,
    /// Logging settings.
    pub log: LogConfig,
}

/// Timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Work phase length in seconds.
    #[serde(default = "default_work")]
    pub work_seconds: i64,
    /// Short break length in seconds.
    #[serde(default = "default_short_break")]
    pub short_break_seconds: i64,
    /// Long break length in seconds.
    #[serde(default = "default_long_break")]
    pub long_break_seconds: i64,
    /// Remaining work time at which the alarm fires, in seconds.
    #[serde(default = "default_alarm")]
    pub alarm_seconds: i64,
    /// Milliseconds between ticks.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Show alarm and phase-change notifications.
    #[serde(default = "default_true")]
    pub notifications: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Log file. The terminal UI logs nowhere when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions for serde
const fn default_work() -> i64 {
    25 * 60
}

const fn default_short_break() -> i64 {
    5 * 60
}

const fn default_long_break() -> i64 {
    15 * 60
}

const fn default_alarm() -> i64 {
    60
}

const fn default_tick_millis() -> u64 {
    1000
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_seconds: default_work(),
            short_break_seconds: default_short_break(),
            long_break_seconds: default_long_break(),
            alarm_seconds: default_alarm(),
            tick_millis: default_tick_millis(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notifications: default_true(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: default_log_level(),
        }
    }
}

impl TimerConfig {
    /// Phase durations.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::Config` if a value is too large to represent.
    pub fn durations(&self) -> Result<Durations, PomodoroError> {
        Ok(Durations {
            work: seconds("work_seconds", self.work_seconds)?,
            short_break: seconds("short_break_seconds", self.short_break_seconds)?,
            long_break: seconds("long_break_seconds", self.long_break_seconds)?,
        })
    }

    /// Alarm offset.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::Config` if the value is too large to represent.
    pub fn alarm(&self) -> Result<Duration, PomodoroError> {
        seconds("alarm_seconds", self.alarm_seconds)
    }

    /// Tick period.
    #[must_use]
    pub const fn period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_millis)
    }
}

fn seconds(field: &str, value: i64) -> Result<Duration, PomodoroError> {
    Duration::try_seconds(value)
        .ok_or_else(|| PomodoroError::Config(format!("timer.{field} is out of range: {value}")))
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, PomodoroError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or
    /// holds a duration too large to represent.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, PomodoroError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomodoroError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            PomodoroError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.timer.durations()?;
        config.timer.alarm()?;
        Ok(config)
    }
}
