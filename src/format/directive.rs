// src/format/directive.rs

//! The table of recognised `%` directives.

/// A single recognised format directive.
///
/// Literal-producing directives (`%%`, `%n`, `%t`) are folded into literal
/// text at compile time and never show up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    // Calendar.
    Year,
    Century,
    YearShort,
    IsoYear,
    IsoYearShort,
    Month,
    MonthAbbr,
    MonthName,
    Day,
    DaySpacePadded,
    DayOfYear,
    WeekdayAbbr,
    WeekdayName,
    WeekdayFromMonday,
    WeekdayFromSunday,
    WeekOfYearSunday,
    WeekOfYearMonday,
    IsoWeek,
    IsoDate,
    UsDate,
    LocaleDate,
    LocaleDateTime,

    // 12-hour clock.
    Hour12,
    Hour12SpacePadded,
    AmPm,
    AmPmLower,
    Time12,

    // Zone.
    Offset,
    OffsetColon,
    ZoneName,

    // Clock fields shared with durations.
    Hour,
    HourSpacePadded,
    Minute,
    Second,
    Time,
    HourMinute,
    Millis,
    Micros,
    Nanos,
    Seconds,
}

impl Directive {
    /// Look up the directive written as `%<c>`.
    pub fn from_char(c: char) -> Option<Self> {
        use Directive::*;

        let d = match c {
            'Y' => Year,
            'C' => Century,
            'y' => YearShort,
            'G' => IsoYear,
            'g' => IsoYearShort,
            'm' => Month,
            'b' | 'h' => MonthAbbr,
            'B' => MonthName,
            'd' => Day,
            'e' => DaySpacePadded,
            'j' => DayOfYear,
            'a' => WeekdayAbbr,
            'A' => WeekdayName,
            'u' => WeekdayFromMonday,
            'w' => WeekdayFromSunday,
            'U' => WeekOfYearSunday,
            'W' => WeekOfYearMonday,
            'V' => IsoWeek,
            'F' => IsoDate,
            'D' => UsDate,
            'x' => LocaleDate,
            'c' => LocaleDateTime,
            'I' => Hour12,
            'l' => Hour12SpacePadded,
            'p' => AmPm,
            'P' => AmPmLower,
            'r' => Time12,
            'z' => Offset,
            'Z' => ZoneName,
            'H' => Hour,
            'k' => HourSpacePadded,
            'M' => Minute,
            'S' => Second,
            'T' => Time,
            'R' => HourMinute,
            'L' => Millis,
            'f' => Micros,
            'N' => Nanos,
            's' => Seconds,
            _ => return None,
        };
        Some(d)
    }

    /// The directive as the user writes it, for error messages.
    pub fn spec(self) -> &'static str {
        use Directive::*;

        match self {
            Year => "%Y",
            Century => "%C",
            YearShort => "%y",
            IsoYear => "%G",
            IsoYearShort => "%g",
            Month => "%m",
            MonthAbbr => "%b",
            MonthName => "%B",
            Day => "%d",
            DaySpacePadded => "%e",
            DayOfYear => "%j",
            WeekdayAbbr => "%a",
            WeekdayName => "%A",
            WeekdayFromMonday => "%u",
            WeekdayFromSunday => "%w",
            WeekOfYearSunday => "%U",
            WeekOfYearMonday => "%W",
            IsoWeek => "%V",
            IsoDate => "%F",
            UsDate => "%D",
            LocaleDate => "%x",
            LocaleDateTime => "%c",
            Hour12 => "%I",
            Hour12SpacePadded => "%l",
            AmPm => "%p",
            AmPmLower => "%P",
            Time12 => "%r",
            Offset => "%z",
            OffsetColon => "%:z",
            ZoneName => "%Z",
            Hour => "%H",
            HourSpacePadded => "%k",
            Minute => "%M",
            Second => "%S",
            Time => "%T",
            HourMinute => "%R",
            Millis => "%L",
            Micros => "%f",
            Nanos => "%N",
            Seconds => "%s",
        }
    }

    /// Equivalent `chrono` strftime item used when rendering an instant.
    pub(crate) fn chrono_spec(self) -> &'static str {
        use Directive::*;

        match self {
            Millis => "%3f",
            Micros => "%6f",
            Nanos => "%9f",
            other => other.spec(),
        }
    }

    /// Whether the directive has a meaning for an elapsed duration.
    ///
    /// Calendar, 12-hour and zone fields have none and are rejected when a
    /// format is compiled for duration rendering.
    pub fn applies_to_duration(self) -> bool {
        use Directive::*;

        matches!(
            self,
            Hour | HourSpacePadded
                | Minute
                | Second
                | Time
                | HourMinute
                | Millis
                | Micros
                | Nanos
                | Seconds
        )
    }
}
