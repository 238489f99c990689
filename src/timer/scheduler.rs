//! Fixed-rate tick scheduling.
//!
//! The timer itself never sleeps; a [`Ticker`] decides when the owner
//! should call `on_tick`. Deadlines advance by exactly one period so a slow
//! frame does not make the countdown drift.

use std::time::{Duration, Instant};

/// Fixed-rate scheduler for timer ticks.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    /// Create a ticker whose first tick is one period from now.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    /// Create a ticker whose first tick is one period after `start`.
    #[must_use]
    pub fn starting_at(period: Duration, start: Instant) -> Self {
        Self {
            period,
            next: start + period,
        }
    }

    /// The tick period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Restart the schedule so the next tick is one period after `now`.
    pub fn restart(&mut self, now: Instant) {
        self.next = now + self.period;
    }

    /// Count the ticks that are due at `now` and advance past them.
    ///
    /// A zero period yields exactly one tick per call.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        if self.period.is_zero() {
            self.next = now;
            return 1;
        }

        let mut due = 0;
        while self.next <= now {
            self.next += self.period;
            due += 1;
        }
        due
    }

    /// Time left until the next tick, zero if one is already due.
    #[must_use]
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Block until the next tick is due, then schedule the one after it.
    pub fn wait(&mut self) {
        std::thread::sleep(self.until_next(Instant::now()));
        self.next += self.period;
    }
}
