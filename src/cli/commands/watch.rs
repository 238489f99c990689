//! Headless watch command.
//!
//! Runs the timer without a terminal UI and prints every event.

use std::io::{self, Write};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use colored::Colorize;
use tracing::info;

use super::build_timer;
use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::PomodoroError;
use crate::output::{format_event, session_label};
use crate::timer::{format_human, PomodoroTimer, Ticker, TimerEvent};

/// Run the timer and stream its events to stdout.
///
/// Stops after `ticks` ticks, or runs until interrupted.
///
/// # Errors
///
/// Returns an error if the timer configuration is invalid or stdout
/// cannot be written.
pub fn watch(
    config: &Config,
    ticks: Option<u64>,
    period_ms: Option<u64>,
    format: OutputFormat,
) -> Result<(), PomodoroError> {
    let mut timer = build_timer(config)?;
    let events = timer.subscribe();
    let period = period_ms.map_or_else(|| config.timer.period(), Duration::from_millis);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if format == OutputFormat::Pretty {
        writeln!(
            out,
            "{} {} ({} of work, alarm at {})",
            "🍅".bold(),
            session_label(timer.session_count()).bold(),
            format_human(timer.durations().work),
            format_human(timer.alarm_offset())
        )?;
    }

    info!(?period, ?ticks, "watching timer");
    timer.start(period);
    print_events(&events, &timer, format, &mut out)?;

    let mut ticker = Ticker::new(period);
    let mut elapsed: u64 = 0;
    while ticks.map_or(true, |limit| elapsed < limit) {
        ticker.wait();
        timer.on_tick();
        elapsed += 1;
        print_events(&events, &timer, format, &mut out)?;
    }

    timer.stop();
    Ok(())
}

fn print_events<W: Write>(
    events: &Receiver<TimerEvent>,
    timer: &PomodoroTimer,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), PomodoroError> {
    let state = timer.state();
    for event in events.try_iter() {
        writeln!(out, "{}", format_event(&event, &state, format)?)?;
    }
    out.flush()?;
    Ok(())
}
