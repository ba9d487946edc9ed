// src/timestamp/zone.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::format::TimeFormat;

/// Time zone used for absolute timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The system zone when it could not be identified by name. Renders
    /// correct local times, but `%Z` falls back to the numeric offset.
    Local,
    Utc,
    Fixed(FixedOffset),
    Named(Tz),
}

impl Zone {
    /// The system's local zone, by IANA name when one can be found.
    ///
    /// `$TZ` wins when set; otherwise the system configuration
    /// (`/etc/localtime` on Linux) is asked.
    pub fn system() -> Zone {
        let tz = std::env::var("TZ").ok();
        Zone::local_from(tz.as_deref(), || iana_time_zone::get_timezone().ok())
    }

    /// Resolve the local zone from a `$TZ` value and a system lookup.
    ///
    /// A `$TZ` that names no IANA zone (a POSIX rule string, say) yields
    /// [`Zone::Local`] without consulting the system; chrono's `Local`
    /// still honours such a value.
    pub fn local_from<F>(tz_var: Option<&str>, system_name: F) -> Zone
    where
        F: FnOnce() -> Option<String>,
    {
        let name = match tz_var {
            Some(value) => Some(zone_name_from_tz(value).to_string()),
            None => system_name(),
        };

        match name.as_deref().map(str::parse::<Tz>) {
            Some(Ok(tz)) => Zone::Named(tz),
            Some(Err(e)) => {
                debug!(error = %e, "local zone has no IANA name; using offsets");
                Zone::Local
            }
            None => Zone::Local,
        }
    }

    /// Render `at` in this zone.
    pub fn render(&self, format: &TimeFormat, at: DateTime<Utc>) -> String {
        match self {
            Zone::Local => format.render_instant(&at.with_timezone(&Local)),
            Zone::Utc => format.render_instant(&at),
            Zone::Fixed(offset) => format.render_instant(&at.with_timezone(offset)),
            Zone::Named(tz) => format.render_instant(&at.with_timezone(tz)),
        }
    }
}

impl Default for Zone {
    fn default() -> Self {
        Zone::Local
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => f.write_str("local"),
            Zone::Utc => f.write_str("UTC"),
            Zone::Fixed(offset) => write!(f, "{offset}"),
            Zone::Named(tz) => f.write_str(tz.name()),
        }
    }
}

impl FromStr for Zone {
    type Err = String;

    /// Parse an IANA time zone name such as `America/New_York`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        name.parse::<Tz>()
            .map(Zone::Named)
            .map_err(|e| format!("unknown time zone '{name}': {e}"))
    }
}

/// Strip the forms `$TZ` may wrap a zone name in: a leading `:` and a path
/// into the zoneinfo database.
fn zone_name_from_tz(value: &str) -> &str {
    let value = value.strip_prefix(':').unwrap_or(value);
    match value.split_once("zoneinfo/") {
        Some((_, name)) => name,
        None => value,
    }
}
