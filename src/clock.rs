//! One-second ticker driving [`Session::tick`](crate::session::Session::tick).
//!
//! The ticker is armed only while a session is `Running`. Whoever owns the
//! event loop calls [`Ticker::sync`] after every transition, so a finished or
//! abandoned game never receives ticks meant for the next one.

use std::time::{Duration, Instant};

use crate::session::Phase;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    /// (Re)starts the schedule so the first tick is one period after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn disarm(&mut self) {
        self.next = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Armed iff `phase` is `Running`. An already armed ticker keeps its
    /// schedule.
    pub fn sync(&mut self, phase: Phase, now: Instant) {
        match phase {
            Phase::Running if self.next.is_none() => self.arm(now),
            Phase::Running => {}
            _ => self.disarm(),
        }
    }

    /// Time left until the next tick, or `None` while disarmed.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }

    /// Number of whole periods that have come due by `now`. The schedule
    /// advances past each of them.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };

        let mut count = 0;
        while next <= now {
            count += 1;
            next += self.period;
        }
        self.next = Some(next);
        count
    }
}
