use std::fmt;
use std::str::FromStr;

/// Timestamp semantics for a run.
///
/// - `Absolute`: wall-clock instant in the configured zone (default).
/// - `Elapsed`: time since the timestamper was created (monotonic).
/// - `Incremental`: time since the previous timestamp (monotonic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeMode {
    Absolute,
    Elapsed,
    Incremental,
}

impl TimeMode {
    /// Format used when the user passes no `--format` (or an empty one).
    pub fn default_format(self) -> &'static str {
        match self {
            TimeMode::Absolute => "[%F %T]",
            TimeMode::Elapsed | TimeMode::Incremental => "[%T]",
        }
    }

    /// Whether timestamps in this mode are durations rather than instants.
    pub fn renders_duration(self) -> bool {
        !matches!(self, TimeMode::Absolute)
    }
}

impl Default for TimeMode {
    fn default() -> Self {
        TimeMode::Absolute
    }
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeMode::Absolute => "absolute",
            TimeMode::Elapsed => "elapsed",
            TimeMode::Incremental => "incremental",
        };
        f.write_str(s)
    }
}

impl FromStr for TimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "absolute" => Ok(TimeMode::Absolute),
            "elapsed" => Ok(TimeMode::Elapsed),
            "incremental" => Ok(TimeMode::Incremental),
            other => Err(format!(
                "invalid time mode: {other} (expected \"absolute\", \"elapsed\" or \"incremental\")"
            )),
        }
    }
}
