#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, Utc};

use ets::timestamp::{ManualClock, Timestamper, Zone};
use ets::types::TimeMode;

/// Builder for a `Timestamper` driven by a `ManualClock`.
///
/// `build` returns the timestamper together with a handle on its clock so the
/// test can advance time between calls.
pub struct TimestamperBuilder {
    format: String,
    mode: TimeMode,
    zone: Zone,
    wall: DateTime<Utc>,
}

impl TimestamperBuilder {
    pub fn new(mode: TimeMode) -> Self {
        Self {
            format: String::new(),
            mode,
            zone: Zone::Utc,
            wall: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    pub fn format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    pub fn zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Wall-clock time at construction.
    pub fn starting_at(mut self, wall: DateTime<Utc>) -> Self {
        self.wall = wall;
        self
    }

    pub fn try_build(self) -> Result<(Timestamper<ManualClock>, ManualClock)> {
        let clock = ManualClock::new(self.wall);
        let timestamper =
            Timestamper::with_clock(&self.format, self.mode, self.zone, clock.clone())?;
        Ok((timestamper, clock))
    }

    pub fn build(self) -> (Timestamper<ManualClock>, ManualClock) {
        self.try_build()
            .expect("Failed to build timestamper from builder")
    }
}
