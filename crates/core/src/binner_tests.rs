// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::metrics::AfkEvent;
use chrono::TimeZone;

fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("valid offset")
}

fn not_afk(ts: DateTime<Utc>, secs: f64) -> AfkEvent {
    AfkEvent {
        timestamp_ms: ts.timestamp_millis(),
        duration_seconds: secs,
        status: AfkStatus::NotAfk,
    }
}

#[test]
fn event_split_across_an_hour_boundary_divides_proportionally() {
    // 2025-12-31T15:30:00Z is 2026-01-01T00:30:00+09:00; a 1h span ending at
    // 01:30 local splits 30 min into hour 0 and 30 min into hour 1.
    let ts = Utc.with_ymd_and_hms(2025, 12, 31, 15, 30, 0).unwrap();
    let events = vec![not_afk(ts, 3600.0)];
    let target = vec![NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()];

    let result = bin_afk_events(&events, &target, jst());
    assert_eq!(result.len(), 1);
    let hours = &result[0].hours;
    assert_eq!(hours[0].active_seconds, 1800.0);
    assert_eq!(hours[1].active_seconds, 1800.0);
    assert!(hours[2..].iter().all(|h| h.active_seconds == 0.0));
}

#[test]
fn dates_not_in_target_receive_no_contribution() {
    let ts = Utc.with_ymd_and_hms(2026, 1, 5, 3, 0, 0).unwrap();
    let events = vec![not_afk(ts, 600.0)];
    let target = vec![NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()];

    let result = bin_afk_events(&events, &target, jst());
    let total: f64 = result[0].hours.iter().map(|h| h.active_seconds).sum();
    assert_eq!(total, 0.0);
}

#[test]
fn dates_with_no_events_yield_24_zero_bins() {
    let target = vec![NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()];
    let result = bin_afk_events(&[], &target, jst());
    assert_eq!(result[0].hours.len(), 24);
    assert!(result[0]
        .hours
        .iter()
        .all(|h| h.active_seconds == 0.0 && h.afk_seconds == 0.0));
}

#[test]
fn output_order_matches_target_date_keys_order() {
    let target = vec![
        NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
    ];
    let result = bin_afk_events(&[], &target, jst());
    let dates: Vec<_> = result.iter().map(|b| b.date.clone()).collect();
    assert_eq!(dates, vec!["2026-01-03", "2026-01-01", "2026-01-02"]);
}

#[test]
fn status_other_is_discarded() {
    let ts = Utc.with_ymd_and_hms(2026, 1, 1, 3, 0, 0).unwrap();
    let events = vec![AfkEvent {
        timestamp_ms: ts.timestamp_millis(),
        duration_seconds: 600.0,
        status: AfkStatus::Other,
    }];
    let target = vec![NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()];
    let result = bin_afk_events(&events, &target, jst());
    let total: f64 = result[0]
        .hours
        .iter()
        .map(|h| h.active_seconds + h.afk_seconds)
        .sum();
    assert_eq!(total, 0.0);
}

#[test]
fn conservation_non_overlapping_spans_sum_to_clipped_durations() {
    let d1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let start = Utc.with_ymd_and_hms(2025, 12, 31, 20, 0, 0).unwrap(); // 05:00 JST Jan 1
    let events = vec![
        not_afk(start, 1800.0),
        AfkEvent {
            timestamp_ms: (start + Duration::seconds(1800)).timestamp_millis(),
            duration_seconds: 5400.0,
            status: AfkStatus::Afk,
        },
    ];
    let target = vec![d1];
    let result = bin_afk_events(&events, &target, jst());
    let total: f64 = result[0]
        .hours
        .iter()
        .map(|h| h.active_seconds + h.afk_seconds)
        .sum();
    assert_eq!(total, 1800.0 + 5400.0);
}

#[test]
fn event_entirely_before_midnight_contributes_nothing_to_next_day() {
    let ts = Utc.with_ymd_and_hms(2025, 12, 31, 1, 0, 0).unwrap(); // 10:00 JST Dec 31
    let events = vec![not_afk(ts, 600.0)];
    let target = vec![NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()];
    let result = bin_afk_events(&events, &target, jst());
    let total: f64 = result[0].hours.iter().map(|h| h.active_seconds).sum();
    assert_eq!(total, 0.0);
}
