// src/format/render.rs

use std::fmt::Display;
use std::time::Duration;

use chrono::{DateTime, TimeZone};

use super::{Directive, TimeFormat, Token};

impl TimeFormat {
    /// Render an instant in its own time zone.
    pub fn render_instant<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field(d) => out.push_str(&at.format(d.chrono_spec()).to_string()),
            }
        }
        out
    }

    /// Render an elapsed duration.
    ///
    /// `%H`/`%k` are total hours and may exceed two digits; `%M` and `%S`
    /// are the minute and second within the hour.
    pub fn render_duration(&self, elapsed: Duration) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field(d) => out.push_str(&duration_field(*d, elapsed)),
            }
        }
        out
    }
}

fn duration_field(directive: Directive, elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;
    let nanos = elapsed.subsec_nanos();

    match directive {
        Directive::Hour => format!("{hours:02}"),
        Directive::HourSpacePadded => format!("{hours:>2}"),
        Directive::Minute => format!("{minutes:02}"),
        Directive::Second => format!("{seconds:02}"),
        Directive::Time => format!("{hours:02}:{minutes:02}:{seconds:02}"),
        Directive::HourMinute => format!("{hours:02}:{minutes:02}"),
        Directive::Millis => format!("{:03}", nanos / 1_000_000),
        Directive::Micros => format!("{:06}", nanos / 1_000),
        Directive::Nanos => format!("{nanos:09}"),
        Directive::Seconds => total.to_string(),
        // Rejected by `TimeFormat::compile` for duration targets.
        other => other.spec().to_string(),
    }
}
