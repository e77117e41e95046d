//! Random log entry generation.

use crate::clock::{Clock, SystemClock};
use crate::entry::{LogEntry, LogLevel, MESSAGES};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// Generates synthetic log entries.
///
/// Level and message are drawn independently and uniformly from their fixed
/// sets; the timestamp is read from the clock at generation time. Both the
/// random source and the clock are owned by the generator so tests can pin
/// them down.
pub struct LogGenerator<R, C> {
    rng: R,
    clock: C,
}

impl LogGenerator<StdRng, SystemClock> {
    /// Seeded generator on the system clock. Same seed, same level/message sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), SystemClock)
    }

    /// Generator seeded from OS entropy on the system clock.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng(), SystemClock)
    }
}

impl<R: Rng, C: Clock> LogGenerator<R, C> {
    pub fn new(rng: R, clock: C) -> Self {
        Self { rng, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Generate the next log entry.
    pub fn next_entry(&mut self) -> LogEntry {
        // Both sets are non-empty constants, so the fallbacks are never taken.
        let level = LogLevel::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(LogLevel::Info);
        let message = MESSAGES.choose(&mut self.rng).unwrap_or(&MESSAGES[0]);

        LogEntry {
            level,
            message: message.to_string(),
            timestamp: self.clock.now_millis(),
        }
    }
}

impl<R: Rng, C: Clock> Iterator for LogGenerator<R, C> {
    type Item = LogEntry;

    fn next(&mut self) -> Option<LogEntry> {
        Some(self.next_entry())
    }
}
