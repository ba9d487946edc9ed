// src/timestamp/clock.rs

use std::fmt::Debug;
use std::time::Instant;

use chrono::{DateTime, Utc};

/// Source of "now" for a [`super::Timestamper`].
///
/// Elapsed and incremental timestamps are measured on the monotonic clock
/// so wall-clock adjustments during a run do not skew them. Absolute
/// timestamps read the wall clock.
pub trait Clock: Send + Debug {
    fn monotonic(&self) -> Instant;
    fn wall(&self) -> DateTime<Utc>;
}

/// The real system clocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn monotonic(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
