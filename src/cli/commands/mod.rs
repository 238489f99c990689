//! Command implementations.
//!
//! Resolves the effective configuration and builds the timer shared by
//! both front ends.

mod watch;

pub use watch::watch;

use crate::cli::args::Cli;
use crate::config::Config;
use crate::error::PomodoroError;
use crate::timer::PomodoroTimer;

/// Load the configuration file and apply command-line overrides.
///
/// When `--work` shortens the work phase without an explicit `--alarm`,
/// the configured alarm is pulled down to the new work length.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be read or parsed.
pub fn load_config(cli: &Cli) -> Result<Config, PomodoroError> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let timer = &mut config.timer;
    if let Some(work) = cli.work {
        timer.work_seconds = work.num_seconds();
        if cli.alarm.is_none() {
            timer.alarm_seconds = timer.alarm_seconds.min(timer.work_seconds);
        }
    }
    if let Some(short_break) = cli.short_break {
        timer.short_break_seconds = short_break.num_seconds();
    }
    if let Some(long_break) = cli.long_break {
        timer.long_break_seconds = long_break.num_seconds();
    }
    if let Some(alarm) = cli.alarm {
        timer.alarm_seconds = alarm.num_seconds();
    }

    Ok(config)
}

/// Build a stopped timer from the configuration.
///
/// # Errors
///
/// Returns `PomodoroError::Config` if a duration is out of range, or
/// `PomodoroError::Timer` if the durations or alarm are invalid.
pub fn build_timer(config: &Config) -> Result<PomodoroTimer, PomodoroError> {
    Ok(PomodoroTimer::with_config(
        config.timer.durations()?,
        config.timer.alarm()?,
    )?)
}
