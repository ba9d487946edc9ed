// src/config/mod.rs

//! Validated run configuration.
//!
//! [`RunConfig`] is the typed form of the command line: one timestamp mode,
//! a format string (already defaulted for the mode), a resolved time zone
//! and what to run. Building it from [`crate::cli::CliArgs`] (see
//! [`validate`]) is where every configuration error is reported, before any
//! stream is touched.

pub mod validate;

use crate::errors::Result;
use crate::exec::Invocation;
use crate::timestamp::{Timestamper, Zone};
use crate::types::TimeMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: TimeMode,
    pub format: String,
    pub zone: Zone,
    pub invocation: Invocation,
}

impl RunConfig {
    /// Build the timestamper for this run; fails on an invalid format.
    pub fn timestamper(&self) -> Result<Timestamper> {
        Ok(Timestamper::new(&self.format, self.mode, self.zone)?)
    }
}
