// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timezone-aware hourly binning of AFK events.
//!
//! Pure: takes a target UTC offset as a parameter rather than reading a
//! process-wide timezone, so the same function produces identical output
//! regardless of where it runs.

use crate::metrics::{AfkEvent, AfkStatus, DailyHourlyBuckets};
use crate::time_range::date_key;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};
use std::collections::HashMap;

/// Bins `events` into one `DailyHourlyBuckets` per entry of `target_date_keys`,
/// in the same order. Events outside the target dates, or whose status is
/// neither `afk` nor `not-afk`, contribute nothing.
pub fn bin_afk_events(
    events: &[AfkEvent],
    target_date_keys: &[NaiveDate],
    offset: FixedOffset,
) -> Vec<DailyHourlyBuckets> {
    let mut buckets: HashMap<NaiveDate, DailyHourlyBuckets> = target_date_keys
        .iter()
        .map(|d| (*d, DailyHourlyBuckets::empty(date_key(*d))))
        .collect();
    let wanted: std::collections::HashSet<NaiveDate> = target_date_keys.iter().copied().collect();

    for event in events {
        let is_active = match event.status {
            AfkStatus::NotAfk => true,
            AfkStatus::Afk => false,
            AfkStatus::Other => continue,
        };
        if event.duration_seconds <= 0.0 {
            continue;
        }

        let span_start = Utc.timestamp_millis_opt(event.timestamp_ms).single();
        let Some(span_start) = span_start else {
            continue;
        };
        let span_end = span_start + duration_from_secs(event.duration_seconds);

        distribute_span(span_start, span_end, offset, &wanted, |date, hour, secs| {
            if let Some(bucket) = buckets.get_mut(&date) {
                let slot = &mut bucket.hours[hour as usize];
                if is_active {
                    slot.active_seconds += secs;
                } else {
                    slot.afk_seconds += secs;
                }
            }
        });
    }

    target_date_keys
        .iter()
        .map(|d| buckets.remove(d).unwrap_or_else(|| DailyHourlyBuckets::empty(date_key(*d))))
        .collect()
}

fn duration_from_secs(secs: f64) -> Duration {
    Duration::milliseconds((secs * 1000.0).round() as i64)
}

/// Walks `[start, end)` one hour-boundary at a time (in `offset`'s local
/// time), invoking `emit(local_date, hour, overlap_seconds)` for each slice
/// that falls on one of `wanted`'s dates.
#[allow(clippy::expect_used)]
fn distribute_span(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    offset: FixedOffset,
    wanted: &std::collections::HashSet<NaiveDate>,
    mut emit: impl FnMut(NaiveDate, u32, f64),
) {
    let mut cursor = start;
    while cursor < end {
        let local = cursor.with_timezone(&offset);
        let local_date = local.date_naive();
        let hour = local.hour();
        let next_hour_local = local.date_naive().and_hms_opt(hour, 0, 0).expect("valid hour")
            + Duration::hours(1);
        let next_boundary_utc = offset
            .from_local_datetime(&next_hour_local)
            .single()
            .unwrap_or(cursor + Duration::hours(1))
            .with_timezone(&Utc);

        let slice_end = next_boundary_utc.min(end);
        let overlap = (slice_end - cursor).num_milliseconds().max(0) as f64 / 1000.0;

        if wanted.contains(&local_date) && overlap > 0.0 {
            emit(local_date, hour, overlap);
        }

        cursor = slice_end;
    }
}

#[cfg(test)]
#[path = "binner_tests.rs"]
mod tests;
