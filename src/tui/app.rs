//! Application state for the TUI.

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::output::{alarm_message, break_title, session_label};
use crate::timer::{Durations, PomodoroTimer, Ticker, TimerEvent};

/// Longest value a settings field accepts (59:59).
const MAX_FIELD_SECONDS: i64 = 59 * 60 + 59;

/// Upper bound on how long input polling may block.
const MAX_POLL: Duration = Duration::from_millis(100);

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Countdown with controls.
    Main,
    /// Duration editor; the timer is stopped while open.
    Settings(SettingsForm),
    /// Full-screen break overlay, locked until work resumes.
    Break { long: bool },
}

/// Editable copy of the timer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    /// Field values in seconds, in `SettingsForm::LABELS` order.
    pub values: [i64; 4],
    /// Index of the focused field.
    pub selected: usize,
}

impl SettingsForm {
    /// Field labels.
    pub const LABELS: [&'static str; 4] = ["WORK", "SHORT BREAK", "LONG BREAK", "ALARM"];
    const WORK: usize = 0;
    const ALARM: usize = 3;

    /// Build a form from the timer's current settings.
    #[must_use]
    pub fn from_timer(timer: &PomodoroTimer) -> Self {
        let d = timer.durations();
        Self {
            values: [
                d.work.num_seconds(),
                d.short_break.num_seconds(),
                d.long_break.num_seconds(),
                timer.alarm_offset().num_seconds(),
            ],
            selected: 0,
        }
    }

    /// Focus the next field.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.values.len();
    }

    /// Focus the previous field.
    pub fn select_previous(&mut self) {
        self.selected = (self.selected + self.values.len() - 1) % self.values.len();
    }

    /// Change the focused field by `delta` seconds.
    ///
    /// Values stay within 00:01..=59:59 and the alarm never exceeds work.
    pub fn adjust(&mut self, delta: i64) {
        let value = (self.values[self.selected] + delta).clamp(1, MAX_FIELD_SECONDS);
        self.values[self.selected] = value;

        let work = self.values[Self::WORK];
        self.values[Self::ALARM] = self.values[Self::ALARM].min(work);
    }

    /// Phase durations entered in the form.
    #[must_use]
    pub const fn durations(&self) -> Durations {
        Durations::from_seconds(self.values[0], self.values[1], self.values[2])
    }

    /// Alarm offset entered in the form.
    #[must_use]
    pub const fn alarm(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.values[Self::ALARM])
    }
}

/// Application state.
pub struct App {
    /// The timer being displayed.
    pub timer: PomodoroTimer,
    events: Receiver<TimerEvent>,
    ticker: Ticker,
    /// Remaining time as last reported by the timer.
    pub display: String,
    /// Label for the current session, e.g. "First Pomodoro".
    pub label: String,
    /// Current screen.
    pub mode: Mode,
    /// Status or notification message.
    pub status: Option<String>,
    notifications: bool,
}

impl App {
    /// Create a new app around a stopped timer.
    pub fn new(mut timer: PomodoroTimer, period: Duration, notifications: bool) -> Self {
        let events = timer.subscribe();
        let display = timer.formatted_remaining();
        let label = session_label(timer.session_count());

        Self {
            timer,
            events,
            ticker: Ticker::new(period),
            display,
            label,
            mode: Mode::Main,
            status: Some("Press space to start, ? for help".to_string()),
            notifications,
        }
    }

    /// Start or pause the timer.
    pub fn toggle(&mut self, now: Instant) {
        if self.timer.is_running() {
            self.timer.stop();
            self.status = Some("Paused".to_string());
        } else {
            self.timer.start(self.ticker.period());
            self.ticker.restart(now);
            self.status = None;
        }
        self.process_events();
    }

    /// Stop the timer and open the settings dialog.
    pub fn open_settings(&mut self) {
        self.timer.stop();
        self.mode = Mode::Settings(SettingsForm::from_timer(&self.timer));
        self.status = None;
    }

    /// Apply the settings dialog and start over from the first session.
    ///
    /// A rejected configuration keeps the dialog open and reports why.
    pub fn save_settings(&mut self) {
        let Mode::Settings(form) = &self.mode else {
            return;
        };

        match self.timer.configure(form.durations(), form.alarm()) {
            Ok(()) => {
                self.timer.reset(true);
                self.label = session_label(0);
                self.mode = Mode::Main;
                self.status = Some("Settings saved".to_string());
            }
            Err(e) => self.status = Some(e.to_string()),
        }
        self.process_events();
    }

    /// Close the settings dialog without applying it.
    pub fn cancel_settings(&mut self) {
        if matches!(self.mode, Mode::Settings(_)) {
            self.mode = Mode::Main;
        }
    }

    /// Restart the current work session, keeping the session count.
    pub fn reset_session(&mut self) {
        if self.mode == Mode::Main {
            self.timer.reset(false);
            self.status = Some("Session reset".to_string());
            self.process_events();
        }
    }

    /// End a break early and resume work.
    pub fn force_end_break(&mut self, now: Instant) {
        if !matches!(self.mode, Mode::Break { .. }) {
            return;
        }

        debug!("break ended early");
        // Restart from stopped so `start` runs its alarm check.
        self.timer.stop();
        self.timer.reset(false);
        self.work_started();
        self.timer.start(self.ticker.period());
        self.ticker.restart(now);
        self.process_events();
    }

    /// Whether quitting is allowed right now.
    #[must_use]
    pub fn can_quit(&self) -> bool {
        !self.timer.phase().is_break() && !matches!(self.mode, Mode::Break { .. })
    }

    /// Deliver any ticks that are due.
    pub fn advance(&mut self, now: Instant) {
        if !self.timer.is_running() {
            return;
        }

        for _ in 0..self.ticker.due_ticks(now) {
            self.timer.on_tick();
        }
        self.process_events();
    }

    /// How long input polling may block before the next tick is due.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        if self.timer.is_running() {
            self.ticker.until_next(now).min(MAX_POLL)
        } else {
            MAX_POLL
        }
    }

    fn process_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(event = event.kind(), "timer event");
            match event {
                TimerEvent::Tick { remaining } => self.display = remaining,
                TimerEvent::RestStarted { long } => {
                    self.mode = Mode::Break { long };
                    if self.notifications {
                        self.status = Some(format!("{} started", break_title(long)));
                    }
                }
                TimerEvent::WorkStarted => self.work_started(),
                TimerEvent::Alarm { minutes, seconds } => {
                    if self.notifications {
                        self.status = Some(alarm_message(minutes, seconds));
                    }
                }
            }
        }
    }

    fn work_started(&mut self) {
        self.mode = Mode::Main;
        self.label = session_label(self.timer.session_count());
        if self.notifications {
            self.status = Some(format!("{} started", self.label));
        }
    }
}
