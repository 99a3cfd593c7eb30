//! Time source used by review sessions.
//!
//! The scheduling functions take `now` as a plain argument. Code that drives
//! them over time (sessions, simulations) reads it from a [`Clock`] so tests
//! can pin or advance time explicitly.

use chrono::{DateTime, Duration, Utc};

/// Source of the current instant.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Clock frozen at `now`.
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Jump to `now`, forwards or backwards.
    pub fn set(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    /// Move forward by `by`.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
