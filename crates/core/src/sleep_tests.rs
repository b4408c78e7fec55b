// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::metrics::AfkEvent;
use chrono::TimeZone;

fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("valid offset")
}

fn afk(ts: DateTime<Utc>, secs: f64) -> AfkEvent {
    AfkEvent {
        timestamp_ms: ts.timestamp_millis(),
        duration_seconds: secs,
        status: AfkStatus::Afk,
    }
}

#[test]
fn short_afk_run_is_not_sleep() {
    let ts = Utc.with_ymd_and_hms(2026, 1, 1, 16, 0, 0).unwrap(); // 01:00 JST Jan 2
    let events = vec![afk(ts, 3600.0)]; // 1h, below SLEEP_MIN_SECONDS
    let target = vec![NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()];
    let result = analyze(&events, &target, jst());
    assert_eq!(result.records[0].sleep_time_minutes, None);
}

#[test]
fn long_afk_run_records_sleep_and_wake_minutes() {
    // 2026-01-01T16:00:00Z = 2026-01-02T01:00 JST; 8h run ends 09:00 JST Jan 2.
    let ts = Utc.with_ymd_and_hms(2026, 1, 1, 16, 0, 0).unwrap();
    let events = vec![afk(ts, 8.0 * 3600.0)];
    let target = vec![
        NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
    ];
    let result = analyze(&events, &target, jst());
    assert_eq!(result.records[0].sleep_time_minutes, Some(60)); // 01:00 = 60 min
    assert_eq!(result.records[0].wake_time_minutes, Some(9 * 60)); // 09:00 = 540 min
}

#[test]
fn earliest_wins_when_multiple_runs_land_on_the_same_date() {
    let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    // Two separate long-AFK runs, both starting on Jan 2 local: 00:30 and 02:00.
    let first = Utc.with_ymd_and_hms(2026, 1, 1, 15, 30, 0).unwrap(); // 00:30 JST Jan 2
    let second = Utc.with_ymd_and_hms(2026, 1, 1, 17, 0, 0).unwrap(); // 02:00 JST Jan 2
    let events = vec![afk(first, 4.0 * 3600.0), afk(second, 4.0 * 3600.0)];
    let result = analyze(&events, &[date], jst());
    assert_eq!(result.records[0].sleep_time_minutes, Some(30)); // earliest: 00:30
}

#[test]
fn averages_omit_days_without_a_value() {
    let d1 = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    let d2 = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
    let ts = Utc.with_ymd_and_hms(2026, 1, 1, 16, 0, 0).unwrap(); // sleeps only on Jan 2
    let events = vec![afk(ts, 6.0 * 3600.0)];
    let result = analyze(&events, &[d1, d2], jst());
    assert_eq!(result.records.len(), 2);
    assert!(result.avg_sleep_minutes.is_some());
    assert_eq!(result.records[1].sleep_time_minutes, None);
    // average is over the single day that has a value, not divided by 2
    assert_eq!(result.avg_sleep_minutes, Some(60.0));
}

#[test]
fn not_afk_events_are_ignored_regardless_of_duration() {
    let ts = Utc.with_ymd_and_hms(2026, 1, 1, 16, 0, 0).unwrap();
    let events = vec![AfkEvent {
        timestamp_ms: ts.timestamp_millis(),
        duration_seconds: 10.0 * 3600.0,
        status: AfkStatus::NotAfk,
    }];
    let target = vec![NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()];
    let result = analyze(&events, &target, jst());
    assert_eq!(result.records[0].sleep_time_minutes, None);
    assert_eq!(result.records[0].wake_time_minutes, None);
}

#[test]
fn records_preserve_one_row_per_target_date_in_order() {
    let dates = vec![
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(),
    ];
    let result = analyze(&[], &dates, jst());
    let keys: Vec<_> = result.records.iter().map(|r| r.date.clone()).collect();
    assert_eq!(keys, vec!["2026-01-01", "2026-01-02", "2026-01-03"]);
}
