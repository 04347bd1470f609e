//! Fixed-step tick accounting.

use std::time::Duration;

/// Length of one simulation tick.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Turns elapsed wall-clock time into whole simulation ticks.
///
/// Time that does not add up to a tick carries over to the next call.
/// A tick only runs once strictly more than one interval is outstanding, so
/// a remainder of exactly one interval waits for the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickClock {
    interval: Duration,
    unprocessed: Duration,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl TickClock {
    /// Creates a clock with the given tick length.
    ///
    /// # Panics
    /// Panics if `interval` is zero.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "tick interval must be non-zero");
        Self {
            interval,
            unprocessed: Duration::ZERO,
        }
    }

    /// Length of one tick.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated but not yet spent on ticks.
    #[must_use]
    pub const fn unprocessed(&self) -> Duration {
        self.unprocessed
    }

    /// Adds `elapsed` and returns how many ticks should run now.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.unprocessed = self.unprocessed.saturating_add(elapsed);
        let mut ticks = 0;
        while self.unprocessed > self.interval {
            self.unprocessed -= self.interval;
            ticks += 1;
        }
        ticks
    }
}
