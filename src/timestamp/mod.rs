// src/timestamp/mod.rs

//! Per-line timestamp computation.
//!
//! A [`Timestamper`] owns the timing mode, the compiled format and the clock
//! bookkeeping for one run. It is driven from a single place (the output
//! drain), so the incremental-mode state needs no locking.

pub mod clock;
pub mod mock;
pub mod zone;

use std::time::{Duration, Instant};

use tracing::debug;

use crate::format::{FormatError, RenderTarget, TimeFormat};
use crate::types::TimeMode;

pub use clock::{Clock, SystemClock};
pub use mock::ManualClock;
pub use zone::Zone;

/// Anything that can hand out one timestamp per emitted line.
pub trait TimestampSource {
    fn current_timestamp_string(&mut self) -> String;
}

#[derive(Debug)]
pub struct Timestamper<C: Clock = SystemClock> {
    mode: TimeMode,
    format: TimeFormat,
    zone: Zone,
    clock: C,
    start: Instant,
    last: Instant,
}

impl Timestamper<SystemClock> {
    /// Build a timestamper on the system clocks.
    ///
    /// An empty `format` selects the mode's default format.
    pub fn new(format: &str, mode: TimeMode, zone: Zone) -> Result<Self, FormatError> {
        Self::with_clock(format, mode, zone, SystemClock)
    }
}

impl<C: Clock> Timestamper<C> {
    pub fn with_clock(
        format: &str,
        mode: TimeMode,
        zone: Zone,
        clock: C,
    ) -> Result<Self, FormatError> {
        let source = if format.is_empty() {
            mode.default_format()
        } else {
            format
        };
        let target = if mode.renders_duration() {
            RenderTarget::Duration
        } else {
            RenderTarget::Instant
        };
        let format = TimeFormat::compile(source, target)?;

        let start = clock.monotonic();
        debug!(%mode, format = %format, %zone, "timestamper ready");

        Ok(Self {
            mode,
            format,
            zone,
            clock,
            start,
            last: start,
        })
    }

    pub fn mode(&self) -> TimeMode {
        self.mode
    }

    pub fn format(&self) -> &TimeFormat {
        &self.format
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Render the timestamp for "now".
    ///
    /// Only incremental mode has a side effect: the reference point moves to
    /// now, so the next call measures from here.
    pub fn current_timestamp_string(&mut self) -> String {
        match self.mode {
            TimeMode::Absolute => self.zone.render(&self.format, self.clock.wall()),
            TimeMode::Elapsed => {
                let now = self.clock.monotonic();
                self.format
                    .render_duration(now.saturating_duration_since(self.start))
            }
            TimeMode::Incremental => {
                let delta = self.advance_last();
                self.format.render_duration(delta)
            }
        }
    }

    fn advance_last(&mut self) -> Duration {
        let now = self.clock.monotonic();
        let delta = now.saturating_duration_since(self.last);
        if now > self.last {
            self.last = now;
        }
        delta
    }
}

impl<C: Clock> TimestampSource for Timestamper<C> {
    fn current_timestamp_string(&mut self) -> String {
        Timestamper::current_timestamp_string(self)
    }
}
