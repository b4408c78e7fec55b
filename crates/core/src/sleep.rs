// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sleep/wake inference from long AFK runs.
//!
//! Pure, like the binner: the target timezone offset is a parameter, never
//! a process-wide setting.

use crate::metrics::{AfkEvent, AfkStatus, DailySleepWake};
use crate::time_range::date_key;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};
use std::collections::HashMap;

/// A long-AFK run is one lasting at least this long; shorter gaps (a coffee
/// break, a locked screen) are not sleep.
pub const SLEEP_MIN_SECONDS: f64 = 3.0 * 3600.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SleepAnalysis {
    pub avg_wake_minutes: Option<f64>,
    pub avg_sleep_minutes: Option<f64>,
    pub records: Vec<DailySleepWake>,
}

/// Derives mean wake/sleep minute-of-day across `target_date_keys` from
/// `events`. Only `afk` events at least `SLEEP_MIN_SECONDS` long are
/// considered; everything else (including `not-afk`/`other`) is ignored.
pub fn analyze(
    events: &[AfkEvent],
    target_date_keys: &[NaiveDate],
    offset: FixedOffset,
) -> SleepAnalysis {
    let mut sleep_minutes: HashMap<NaiveDate, u32> = HashMap::new();
    let mut wake_minutes: HashMap<NaiveDate, u32> = HashMap::new();

    for event in events {
        if event.status != AfkStatus::Afk || event.duration_seconds < SLEEP_MIN_SECONDS {
            continue;
        }
        let Some(start) = Utc.timestamp_millis_opt(event.timestamp_ms).single() else {
            continue;
        };
        let end = start + Duration::milliseconds((event.duration_seconds * 1000.0).round() as i64);

        let local_start = start.with_timezone(&offset);
        let local_end = end.with_timezone(&offset);

        let sleep_date = local_start.date_naive();
        let sleep_minute = minute_of_day(local_start);
        sleep_minutes
            .entry(sleep_date)
            .and_modify(|m| *m = (*m).min(sleep_minute))
            .or_insert(sleep_minute);

        let wake_date = local_end.date_naive();
        let wake_minute = minute_of_day(local_end);
        wake_minutes
            .entry(wake_date)
            .and_modify(|m| *m = (*m).min(wake_minute))
            .or_insert(wake_minute);
    }

    let records: Vec<DailySleepWake> = target_date_keys
        .iter()
        .map(|d| DailySleepWake {
            date: date_key(*d),
            wake_time_minutes: wake_minutes.get(d).copied(),
            sleep_time_minutes: sleep_minutes.get(d).copied(),
        })
        .collect();

    SleepAnalysis {
        avg_wake_minutes: average(records.iter().filter_map(|r| r.wake_time_minutes)),
        avg_sleep_minutes: average(records.iter().filter_map(|r| r.sleep_time_minutes)),
        records,
    }
}

fn minute_of_day(dt: DateTime<FixedOffset>) -> u32 {
    dt.hour() * 60 + dt.minute()
}

fn average(values: impl Iterator<Item = u32>) -> Option<f64> {
    let values: Vec<u32> = values.collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
#[path = "sleep_tests.rs"]
mod tests;
