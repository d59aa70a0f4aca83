//! Wall-clock sources for round timestamps.

use crate::types::TimestampMillis;
use chrono::Utc;

/// Yields the timestamp stamped on each round record.
pub trait WallClock: Send {
    fn now_millis(&mut self) -> TimestampMillis;
}

/// Real time, via chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_millis(&mut self) -> TimestampMillis {
        Utc::now().timestamp_millis()
    }
}

/// Deterministic clock: returns `start`, then advances by `step_ms` per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualClock {
    next:    TimestampMillis,
    step_ms: TimestampMillis,
}

impl ManualClock {
    pub fn new(start: TimestampMillis, step_ms: TimestampMillis) -> Self {
        Self { next: start, step_ms }
    }

    /// A clock frozen at `at`.
    pub fn fixed(at: TimestampMillis) -> Self {
        Self::new(at, 0)
    }
}

impl WallClock for ManualClock {
    fn now_millis(&mut self) -> TimestampMillis {
        let now = self.next;
        self.next += self.step_ms;
        now
    }
}
