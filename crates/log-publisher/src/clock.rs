//! Wall-clock sources for entry timestamps.

use std::cell::Cell;

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
///
/// Useful for deterministic timestamps in tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: Cell<i64>,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            millis: Cell::new(start_millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.millis.set(millis);
    }

    pub fn advance(&self, delta_millis: i64) {
        self.millis.set(self.millis.get().saturating_add(delta_millis));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}
