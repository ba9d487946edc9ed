// src/timestamp/mock.rs

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use super::Clock;

#[derive(Debug)]
struct ManualState {
    monotonic: Instant,
    wall: DateTime<Utc>,
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// hand another to a `Timestamper`.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Arc<Mutex<ManualState>>,
}

impl ManualClock {
    pub fn new(wall: DateTime<Utc>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState {
                monotonic: Instant::now(),
                wall,
            })),
        }
    }

    /// Move both the monotonic and the wall clock forward.
    pub fn advance(&self, by: Duration) {
        let mut state = self.state.lock().unwrap();
        state.monotonic += by;
        state.wall += by;
    }

    /// Jump the wall clock without touching the monotonic clock, like an NTP
    /// step or a manual clock change.
    pub fn set_wall(&self, wall: DateTime<Utc>) {
        self.state.lock().unwrap().wall = wall;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn monotonic(&self) -> Instant {
        self.state.lock().unwrap().monotonic
    }

    fn wall(&self) -> DateTime<Utc> {
        self.state.lock().unwrap().wall
    }
}
