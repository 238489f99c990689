//! The Pomodoro state machine.
//!
//! [`PomodoroTimer`] owns the current phase, the remaining time and the
//! completed-session counter. An external scheduler calls
//! [`PomodoroTimer::on_tick`] once per second while the timer runs; every
//! state change is reported to the registered observers.

use std::sync::mpsc::{self, Receiver};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::event::{TimerEvent, TimerObserver};
use super::format::{format_mmss, split_minutes_seconds};
use super::phase::{Durations, Phase, SESSIONS_PER_CYCLE};

/// Default tick period used until `start` supplies one.
pub const DEFAULT_PERIOD: std::time::Duration = std::time::Duration::from_millis(1000);

/// Errors reported by the timer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// Durations or alarm offset out of range, or reconfigured while running.
    #[error("invalid timer configuration: {0}")]
    InvalidConfig(String),
}

/// Snapshot of the timer's domain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current phase
    pub phase: Phase,
    /// Remaining seconds in the current phase
    pub remaining_seconds: i64,
    /// Work phases completed since the last long break
    pub session_count: usize,
    /// Whether the scheduler should be ticking
    pub running: bool,
}

/// A periodic-tick Pomodoro timer.
pub struct PomodoroTimer {
    durations: Durations,
    alarm: Duration,
    phase: Phase,
    /// Remaining whole seconds in the current phase
    remaining: i64,
    session_count: usize,
    running: bool,
    period: std::time::Duration,
    observers: Vec<Box<dyn TimerObserver>>,
}

impl std::fmt::Debug for PomodoroTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PomodoroTimer")
            .field("durations", &self.durations)
            .field("alarm", &self.alarm)
            .field("phase", &self.phase)
            .field("remaining", &self.remaining)
            .field("session_count", &self.session_count)
            .field("running", &self.running)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PomodoroTimer {
    /// Create a stopped timer with the default 25/5/15 minute durations and
    /// a one minute alarm.
    #[must_use]
    pub fn new() -> Self {
        let durations = Durations::default();
        Self {
            durations,
            alarm: Duration::minutes(1),
            phase: Phase::Work,
            remaining: durations.work.num_seconds(),
            session_count: 0,
            running: false,
            period: DEFAULT_PERIOD,
            observers: Vec::new(),
        }
    }

    /// Create a stopped timer with the given durations and alarm offset.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidConfig` if the configuration is rejected
    /// by [`Self::configure`].
    pub fn with_config(durations: Durations, alarm: Duration) -> Result<Self, TimerError> {
        let mut timer = Self::new();
        timer.configure(durations, alarm)?;
        timer.remaining = durations.work.num_seconds();
        Ok(timer)
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn observe<O>(&mut self, observer: O)
    where
        O: TimerObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Subscribe to events through a channel.
    ///
    /// Events are cloned into the channel; a dropped receiver is ignored.
    pub fn subscribe(&mut self) -> Receiver<TimerEvent> {
        let (tx, rx) = mpsc::channel();
        self.observe(move |event: &TimerEvent| {
            let _ = tx.send(event.clone());
        });
        rx
    }

    /// Replace the phase durations and alarm offset.
    ///
    /// If the current phase is now shorter than the remaining time, the
    /// remaining time is clamped to the new length.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidConfig` if the timer is running, any
    /// duration is shorter than one second, or the alarm offset is negative
    /// or longer than the work duration. State is unchanged on error.
    pub fn configure(&mut self, durations: Durations, alarm: Duration) -> Result<(), TimerError> {
        if self.running {
            return Err(TimerError::InvalidConfig(
                "cannot reconfigure while the timer is running".to_string(),
            ));
        }

        for phase in [Phase::Work, Phase::ShortBreak, Phase::LongBreak] {
            if durations.of(phase).num_seconds() < 1 {
                return Err(TimerError::InvalidConfig(format!(
                    "{} duration must be at least one second",
                    phase.display_name().to_lowercase()
                )));
            }
        }

        if alarm.num_seconds() < 0 {
            return Err(TimerError::InvalidConfig(
                "alarm offset must not be negative".to_string(),
            ));
        }

        if alarm.num_seconds() > durations.work.num_seconds() {
            return Err(TimerError::InvalidConfig(format!(
                "alarm offset {} exceeds work duration {}",
                format_mmss(alarm),
                format_mmss(durations.work)
            )));
        }

        self.durations = durations;
        self.alarm = Duration::seconds(alarm.num_seconds());
        self.remaining = self.remaining.min(self.phase_seconds(self.phase));

        info!(
            work = %format_mmss(durations.work),
            short_break = %format_mmss(durations.short_break),
            long_break = %format_mmss(durations.long_break),
            alarm = %format_mmss(alarm),
            "timer configured"
        );
        Ok(())
    }

    /// Return to the start of a work phase.
    ///
    /// The completed-session counter is cleared only when
    /// `reset_session_count` is true. Emits a tick so observers can redraw.
    pub fn reset(&mut self, reset_session_count: bool) {
        self.phase = Phase::Work;
        self.remaining = self.phase_seconds(Phase::Work);
        if reset_session_count {
            self.session_count = 0;
        }

        debug!(reset_session_count, "timer reset");
        self.emit_tick();
    }

    /// Start ticking with the given period.
    ///
    /// Does nothing if already running. When started exactly at the alarm
    /// offset of a work phase the alarm fires immediately.
    pub fn start(&mut self, period: std::time::Duration) {
        if self.running {
            return;
        }

        self.running = true;
        self.period = period;
        info!(phase = %self.phase, remaining = %self.formatted_remaining(), "timer started");

        if self.alarm_due() {
            self.emit_alarm();
        }
    }

    /// Stop ticking. Does nothing if already stopped.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }

        self.running = false;
        info!(phase = %self.phase, remaining = %self.formatted_remaining(), "timer stopped");
    }

    /// Advance the timer by one second.
    ///
    /// Reaching zero moves to the next phase within the same tick. Ticks
    /// delivered while stopped are ignored.
    pub fn on_tick(&mut self) {
        if !self.running {
            warn!("tick received while the timer is stopped");
            return;
        }

        if self.remaining > 0 {
            self.remaining -= 1;
        }

        if self.remaining == 0 {
            self.advance_phase();
        }

        if self.alarm_due() {
            self.emit_alarm();
        }

        debug!(phase = %self.phase, remaining = self.remaining, "tick");
        self.emit_tick();
    }

    /// Remaining time formatted as `mm:ss`.
    #[must_use]
    pub fn formatted_remaining(&self) -> String {
        format_mmss(self.remaining())
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Remaining time in the current phase.
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        Duration::seconds(self.remaining)
    }

    /// Work phases completed since the last long break.
    #[must_use]
    pub const fn session_count(&self) -> usize {
        self.session_count
    }

    /// Check if the timer is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Configured phase durations.
    #[must_use]
    pub const fn durations(&self) -> Durations {
        self.durations
    }

    /// Configured alarm offset.
    #[must_use]
    pub const fn alarm_offset(&self) -> Duration {
        self.alarm
    }

    /// Tick period supplied by the last `start`.
    #[must_use]
    pub const fn period(&self) -> std::time::Duration {
        self.period
    }

    /// Snapshot of the current state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        TimerState {
            phase: self.phase,
            remaining_seconds: self.remaining,
            session_count: self.session_count,
            running: self.running,
        }
    }

    fn advance_phase(&mut self) {
        if self.phase == Phase::Work {
            self.session_count = (self.session_count + 1) % SESSIONS_PER_CYCLE;
            self.phase = if self.session_count == 0 {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            };
            self.remaining = self.phase_seconds(self.phase);

            let long = self.phase == Phase::LongBreak;
            info!(phase = %self.phase, session_count = self.session_count, "break started");
            self.emit(&TimerEvent::RestStarted { long });
        } else {
            self.phase = Phase::Work;
            self.remaining = self.phase_seconds(Phase::Work);

            info!(session_count = self.session_count, "work started");
            self.emit(&TimerEvent::WorkStarted);
        }
    }

    fn alarm_due(&self) -> bool {
        self.phase == Phase::Work && self.remaining == self.alarm.num_seconds()
    }

    fn phase_seconds(&self, phase: Phase) -> i64 {
        self.durations.of(phase).num_seconds()
    }

    fn emit_alarm(&mut self) {
        let (minutes, seconds) = split_minutes_seconds(self.alarm);
        info!(minutes, seconds, "alarm");
        self.emit(&TimerEvent::Alarm { minutes, seconds });
    }

    fn emit_tick(&mut self) {
        let remaining = self.formatted_remaining();
        self.emit(&TimerEvent::Tick { remaining });
    }

    fn emit(&mut self, event: &TimerEvent) {
        for observer in &mut self.observers {
            observer.notify(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::event::MockTimerObserver;

    const PERIOD: std::time::Duration = std::time::Duration::from_millis(1000);

    fn timer(work: i64, short_break: i64, long_break: i64, alarm: i64) -> PomodoroTimer {
        PomodoroTimer::with_config(
            Durations::from_seconds(work, short_break, long_break),
            Duration::seconds(alarm),
        )
        .unwrap()
    }

    fn drain(rx: &Receiver<TimerEvent>) -> Vec<TimerEvent> {
        rx.try_iter().collect()
    }

    fn alarms(events: &[TimerEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, TimerEvent::Alarm { .. }))
            .count()
    }

    #[test]
    fn test_new_timer_state() {
        let timer = PomodoroTimer::new();
        let state = timer.state();

        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.remaining_seconds, 25 * 60);
        assert_eq!(state.session_count, 0);
        assert!(!state.running);
        assert_eq!(timer.formatted_remaining(), "25:00");
    }

    #[test]
    fn test_configure_then_reset() {
        for (w, s, l, a) in [(1, 1, 1, 0), (1, 1, 1, 1), (3, 2, 7, 2), (1500, 300, 900, 60)] {
            let mut timer = PomodoroTimer::new();
            timer
                .configure(Durations::from_seconds(w, s, l), Duration::seconds(a))
                .unwrap();
            timer.reset(true);

            assert_eq!(timer.phase(), Phase::Work);
            assert_eq!(timer.remaining(), Duration::seconds(w));
            assert_eq!(timer.session_count(), 0);
        }
    }

    #[test]
    fn test_configure_rejects_alarm_over_work() {
        let mut timer = timer(10, 5, 7, 3);
        let before = timer.state();

        let err = timer
            .configure(Durations::from_seconds(10, 5, 7), Duration::seconds(11))
            .unwrap_err();

        assert!(matches!(err, TimerError::InvalidConfig(_)));
        assert_eq!(timer.state(), before);
        assert_eq!(timer.alarm_offset(), Duration::seconds(3));
        assert_eq!(timer.durations(), Durations::from_seconds(10, 5, 7));
    }

    #[test]
    fn test_configure_rejects_short_durations() {
        let mut timer = PomodoroTimer::new();
        assert!(timer
            .configure(Durations::from_seconds(0, 5, 5), Duration::zero())
            .is_err());
        assert!(timer
            .configure(Durations::from_seconds(5, 0, 5), Duration::zero())
            .is_err());
        assert!(timer
            .configure(Durations::from_seconds(5, 5, -1), Duration::zero())
            .is_err());
        assert!(timer
            .configure(Durations::from_seconds(5, 5, 5), Duration::seconds(-1))
            .is_err());
    }

    #[test]
    fn test_configure_rejected_while_running() {
        let mut timer = timer(10, 5, 7, 3);
        timer.start(PERIOD);

        let result = timer.configure(Durations::from_seconds(20, 5, 7), Duration::seconds(3));
        assert!(matches!(result, Err(TimerError::InvalidConfig(_))));
        assert_eq!(timer.durations().work, Duration::seconds(10));

        timer.stop();
        assert!(timer
            .configure(Durations::from_seconds(20, 5, 7), Duration::seconds(3))
            .is_ok());
    }

    #[test]
    fn test_configure_clamps_remaining() {
        let mut timer = timer(60, 5, 7, 3);
        timer
            .configure(Durations::from_seconds(10, 5, 7), Duration::seconds(3))
            .unwrap();
        assert_eq!(timer.remaining(), Duration::seconds(10));
    }

    #[test]
    fn test_three_ticks_reach_short_break() {
        let mut timer = timer(3, 2, 5, 1);
        timer.start(PERIOD);

        for _ in 0..3 {
            timer.on_tick();
        }

        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert_eq!(timer.session_count(), 1);
        assert_eq!(timer.remaining(), Duration::seconds(2));
    }

    #[test]
    fn test_fourth_work_phase_earns_long_break() {
        let mut timer = timer(2, 1, 3, 1);
        let rx = timer.subscribe();
        timer.start(PERIOD);

        let mut rests = Vec::new();
        for _ in 0..4 {
            // work (2 ticks) then break
            timer.on_tick();
            timer.on_tick();
            rests.push((timer.phase(), timer.session_count()));
            if timer.phase() == Phase::ShortBreak {
                timer.on_tick();
                assert_eq!(timer.phase(), Phase::Work);
            }
        }

        assert_eq!(
            rests,
            vec![
                (Phase::ShortBreak, 1),
                (Phase::ShortBreak, 2),
                (Phase::ShortBreak, 3),
                (Phase::LongBreak, 0),
            ]
        );
        assert_eq!(timer.remaining(), Duration::seconds(3));

        let long_flags: Vec<bool> = drain(&rx)
            .into_iter()
            .filter_map(|e| match e {
                TimerEvent::RestStarted { long } => Some(long),
                _ => None,
            })
            .collect();
        assert_eq!(long_flags, vec![false, false, false, true]);
    }

    #[test]
    fn test_alarm_fires_once_per_work_phase() {
        let mut timer = timer(25 * 60, 5 * 60, 15 * 60, 60);
        let rx = timer.subscribe();
        timer.start(PERIOD);

        for _ in 0..(24 * 60 - 1) {
            timer.on_tick();
        }
        assert_eq!(timer.remaining(), Duration::seconds(61));
        assert_eq!(alarms(&drain(&rx)), 0);

        timer.on_tick();
        assert_eq!(timer.remaining(), Duration::seconds(60));
        let events = drain(&rx);
        assert_eq!(
            events,
            vec![
                TimerEvent::Alarm {
                    minutes: 1,
                    seconds: 0
                },
                TimerEvent::Tick {
                    remaining: "01:00".to_string()
                },
            ]
        );

        for _ in 0..60 {
            timer.on_tick();
        }
        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert_eq!(alarms(&drain(&rx)), 0);
    }

    #[test]
    fn test_start_at_alarm_threshold() {
        let mut timer = timer(5, 1, 1, 5);
        let rx = timer.subscribe();

        timer.start(PERIOD);
        timer.start(PERIOD);

        assert_eq!(
            drain(&rx),
            vec![TimerEvent::Alarm {
                minutes: 0,
                seconds: 5
            }]
        );
    }

    #[test]
    fn test_start_alarm_only_in_work() {
        let mut timer = timer(2, 1, 1, 1);
        timer.start(PERIOD);
        timer.on_tick();
        timer.on_tick();
        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert_eq!(timer.remaining(), Duration::seconds(1));

        let rx = timer.subscribe();
        timer.stop();
        timer.start(PERIOD);
        assert_eq!(alarms(&drain(&rx)), 0);
    }

    #[test]
    fn test_alarm_equal_to_work_fires_at_phase_start() {
        let mut timer = timer(2, 1, 1, 2);
        let rx = timer.subscribe();
        timer.start(PERIOD);
        timer.on_tick();
        timer.on_tick();
        timer.on_tick();

        let events = drain(&rx);
        assert_eq!(alarms(&events), 2);
        assert_eq!(
            &events[events.len() - 3..],
            &[
                TimerEvent::WorkStarted,
                TimerEvent::Alarm {
                    minutes: 0,
                    seconds: 2
                },
                TimerEvent::Tick {
                    remaining: "00:02".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_end_to_end_sequence() {
        let mut timer = timer(2, 1, 1, 1);
        timer.reset(true);
        let rx = timer.subscribe();
        timer.start(PERIOD);
        assert!(drain(&rx).is_empty());

        timer.on_tick();
        assert_eq!(timer.remaining(), Duration::seconds(1));
        assert_eq!(
            drain(&rx),
            vec![
                TimerEvent::Alarm {
                    minutes: 0,
                    seconds: 1
                },
                TimerEvent::Tick {
                    remaining: "00:01".to_string()
                },
            ]
        );

        timer.on_tick();
        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert_eq!(timer.remaining(), Duration::seconds(1));
        assert_eq!(
            drain(&rx),
            vec![
                TimerEvent::RestStarted { long: false },
                TimerEvent::Tick {
                    remaining: "00:01".to_string()
                },
            ]
        );

        timer.on_tick();
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining(), Duration::seconds(2));
        assert_eq!(
            drain(&rx),
            vec![
                TimerEvent::WorkStarted,
                TimerEvent::Tick {
                    remaining: "00:02".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_reset_session_count_flag() {
        let mut timer = timer(1, 1, 1, 0);
        timer.start(PERIOD);
        timer.on_tick();
        assert_eq!(timer.session_count(), 1);
        assert_eq!(timer.phase(), Phase::ShortBreak);

        timer.reset(false);
        assert_eq!(timer.session_count(), 1);
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining(), Duration::seconds(1));

        timer.reset(true);
        assert_eq!(timer.session_count(), 0);
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining(), Duration::seconds(1));
    }

    #[test]
    fn test_reset_emits_tick() {
        let mut timer = PomodoroTimer::new();
        let rx = timer.subscribe();
        timer.reset(true);
        assert_eq!(
            drain(&rx),
            vec![TimerEvent::Tick {
                remaining: "25:00".to_string()
            }]
        );
    }

    #[test]
    fn test_tick_ignored_while_stopped() {
        let mut timer = timer(5, 1, 1, 0);
        let rx = timer.subscribe();
        timer.on_tick();

        assert_eq!(timer.remaining(), Duration::seconds(5));
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut timer = PomodoroTimer::new();
        timer.stop();
        assert!(!timer.is_running());

        timer.start(std::time::Duration::from_millis(250));
        timer.start(PERIOD);
        assert!(timer.is_running());
        assert_eq!(timer.period(), std::time::Duration::from_millis(250));

        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
    }

    #[test]
    fn test_observers_in_registration_order() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut timer = PomodoroTimer::new();

        let first = Rc::clone(&log);
        timer.observe(move |e: &TimerEvent| first.borrow_mut().push(("first", e.kind())));
        let second = Rc::clone(&log);
        timer.observe(move |e: &TimerEvent| second.borrow_mut().push(("second", e.kind())));

        timer.reset(false);

        assert_eq!(*log.borrow(), vec![("first", "tick"), ("second", "tick")]);
    }

    #[test]
    fn test_mock_observer_sees_rest_started() {
        let mut observer = MockTimerObserver::new();
        observer
            .expect_notify()
            .withf(|e| matches!(e, TimerEvent::RestStarted { long: false }))
            .times(1)
            .return_const(());
        observer
            .expect_notify()
            .withf(|e| matches!(e, TimerEvent::Tick { .. }))
            .times(1)
            .return_const(());

        let mut timer = timer(1, 1, 1, 0);
        timer.observe(observer);
        timer.start(PERIOD);
        timer.on_tick();
    }

    #[test]
    fn test_remaining_never_exceeds_phase_duration() {
        let mut timer = timer(3, 2, 4, 1);
        timer.start(PERIOD);

        for _ in 0..40 {
            timer.on_tick();
            let limit = timer.durations().of(timer.phase());
            assert!(timer.remaining() <= limit);
            assert!(timer.remaining() > Duration::zero());
            assert!(timer.session_count() < SESSIONS_PER_CYCLE);
        }
    }
}
