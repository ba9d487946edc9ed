// tests/timestamper_modes.rs

use std::error::Error;
use std::time::Duration;

use chrono::{FixedOffset, TimeZone, Utc};
use regex::Regex;

use ets::timestamp::Zone;
use ets::types::TimeMode;
use ets_test_utils::builders::TimestamperBuilder;
use ets_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn incremental_measures_only_the_gap_since_the_previous_call() {
    init_tracing();
    let (mut ts, clock) = TimestamperBuilder::new(TimeMode::Incremental)
        .format("%s.%L")
        .build();

    clock.advance(Duration::from_secs(1));
    assert_eq!(ts.current_timestamp_string(), "1.000");

    clock.advance(Duration::from_millis(2500));
    assert_eq!(ts.current_timestamp_string(), "2.500");

    // No time passed since the last call.
    assert_eq!(ts.current_timestamp_string(), "0.000");
}

#[test]
fn elapsed_always_measures_from_construction() {
    init_tracing();
    let (mut ts, clock) = TimestamperBuilder::new(TimeMode::Elapsed)
        .format("%s.%L")
        .build();

    clock.advance(Duration::from_secs(1));
    assert_eq!(ts.current_timestamp_string(), "1.000");

    clock.advance(Duration::from_millis(2500));
    assert_eq!(ts.current_timestamp_string(), "3.500");
    assert_eq!(ts.current_timestamp_string(), "3.500");
}

#[test]
fn elapsed_ignores_wall_clock_steps() {
    init_tracing();
    let (mut ts, clock) = TimestamperBuilder::new(TimeMode::Elapsed).build();

    clock.advance(Duration::from_secs(5));
    clock.set_wall(Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(ts.current_timestamp_string(), "[00:00:05]");
}

#[test]
fn elapsed_hours_keep_counting_past_a_day() {
    init_tracing();
    let (mut ts, clock) = TimestamperBuilder::new(TimeMode::Elapsed).build();

    clock.advance(Duration::from_secs(3725));
    assert_eq!(ts.current_timestamp_string(), "[01:02:05]");

    clock.advance(Duration::from_secs(90_000 - 3725));
    assert_eq!(ts.current_timestamp_string(), "[25:00:00]");
}

#[test]
fn absolute_is_timezone_sensitive() -> TestResult {
    init_tracing();
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap();
    let plus_five = FixedOffset::east_opt(5 * 3600).ok_or("bad offset")?;

    let (mut utc, _) = TimestamperBuilder::new(TimeMode::Absolute)
        .format("%H")
        .starting_at(at)
        .build();
    let (mut fixed, _) = TimestamperBuilder::new(TimeMode::Absolute)
        .format("%H")
        .zone(Zone::Fixed(plus_five))
        .starting_at(at)
        .build();

    let utc_hour: i32 = utc.current_timestamp_string().parse()?;
    let fixed_hour: i32 = fixed.current_timestamp_string().parse()?;
    assert_eq!(fixed_hour - utc_hour, 5);

    Ok(())
}

#[test]
fn absolute_renders_named_zones() -> TestResult {
    init_tracing();
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap();
    let tokyo: Zone = "Asia/Tokyo".parse()?;

    let (mut ts, _) = TimestamperBuilder::new(TimeMode::Absolute)
        .format("%F %T %Z")
        .zone(tokyo)
        .starting_at(at)
        .build();

    assert_eq!(ts.current_timestamp_string(), "2024-03-01 19:15:30 JST");
    Ok(())
}

#[test]
fn absolute_follows_the_wall_clock_without_mutating_state() {
    init_tracing();
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap();
    let (mut ts, clock) = TimestamperBuilder::new(TimeMode::Absolute)
        .starting_at(at)
        .build();

    assert_eq!(ts.current_timestamp_string(), "[2024-03-01 10:15:30]");
    assert_eq!(ts.current_timestamp_string(), "[2024-03-01 10:15:30]");

    clock.advance(Duration::from_secs(61));
    assert_eq!(ts.current_timestamp_string(), "[2024-03-01 10:16:31]");
}

#[test]
fn empty_format_selects_the_mode_default() {
    init_tracing();
    let absolute_shape = Regex::new(r"^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\]$").unwrap();
    let duration_shape = Regex::new(r"^\[\d{2}:\d{2}:\d{2}\]$").unwrap();

    let (mut absolute, _) = TimestamperBuilder::new(TimeMode::Absolute).build();
    assert_eq!(absolute.format().as_str(), "[%F %T]");
    assert!(absolute_shape.is_match(&absolute.current_timestamp_string()));

    for mode in [TimeMode::Elapsed, TimeMode::Incremental] {
        let (mut ts, _) = TimestamperBuilder::new(mode).build();
        assert_eq!(ts.format().as_str(), "[%T]");
        assert_eq!(ts.current_timestamp_string(), "[00:00:00]");
        assert!(duration_shape.is_match(&ts.current_timestamp_string()));
    }
}

#[test]
fn system_clock_timestamper_renders_the_default_shape() -> TestResult {
    init_tracing();
    let mut ts = ets::timestamp::Timestamper::new("", TimeMode::Absolute, Zone::Local)?;
    let shape = Regex::new(r"^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\]$")?;

    assert!(shape.is_match(&ts.current_timestamp_string()));
    assert_eq!(ts.mode(), TimeMode::Absolute);
    assert_eq!(ts.zone(), Zone::Local);
    Ok(())
}

#[test]
fn local_zone_is_resolved_by_name() {
    let oslo: Zone = "Europe/Oslo".parse().unwrap();
    let never = || -> Option<String> { panic!("system lookup must not run when TZ is set") };

    assert_eq!(Zone::local_from(Some("Europe/Oslo"), never), oslo);
    assert_eq!(Zone::local_from(Some(":Europe/Oslo"), never), oslo);
    assert_eq!(
        Zone::local_from(Some("/usr/share/zoneinfo/Europe/Oslo"), never),
        oslo
    );
    assert_eq!(
        Zone::local_from(None, || Some("Europe/Oslo".to_string())),
        oslo
    );
}

#[test]
fn unnamed_local_zone_falls_back_to_offsets() {
    assert_eq!(Zone::local_from(Some("CET-1CEST"), || None), Zone::Local);
    assert_eq!(Zone::local_from(None, || None), Zone::Local);
    assert_eq!(
        Zone::local_from(None, || Some("Not/A_Zone".to_string())),
        Zone::Local
    );
}

#[test]
fn named_local_zone_renders_the_abbreviation() {
    init_tracing();
    let local = Zone::local_from(Some("Europe/Oslo"), || None);
    let summer = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
    let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();

    let (mut ts, clock) = TimestamperBuilder::new(TimeMode::Absolute)
        .format("%H:%M %Z")
        .zone(local)
        .starting_at(summer)
        .build();
    assert_eq!(ts.current_timestamp_string(), "14:00 CEST");

    clock.set_wall(winter);
    assert_eq!(ts.current_timestamp_string(), "13:00 CET");
}
