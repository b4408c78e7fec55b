// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time windows and local-date key derivation.
//!
//! Nothing in this module depends on a process-wide timezone: every
//! function that needs one takes a `chrono::FixedOffset` explicitly.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

/// An inclusive-start, inclusive-end UTC instant window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The single local calendar day `local_date`, covering
    /// `[start_of_day, start_of_day + 1 day)` in UTC as seen through `offset`.
    pub fn single_day(local_date: NaiveDate, offset: FixedOffset) -> Self {
        let naive_midnight = local_date.and_hms_opt(0, 0, 0).unwrap_or_default();
        let utc_naive = naive_midnight - Duration::seconds(offset.local_minus_utc() as i64);
        let start = DateTime::<Utc>::from_naive_utc_and_offset(utc_naive, Utc);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    /// Server-side query period encoding: `YYYY-MM-DD/YYYY-MM-DD`, end exclusive
    /// (i.e. the calendar date *after* the last day actually covered).
    ///
    /// Both ends are projected through `offset` before formatting: `start`/`end`
    /// are UTC instants, and a window's local calendar day is not generally its
    /// UTC calendar day (JST midnight Jan 1 is `2025-12-31T15:00Z`). The end is
    /// read one instant before the boundary so an exact next-local-midnight
    /// instant (as `single_day` produces) still reports the day it closes, then
    /// the exclusive day-after is added back.
    pub fn query_period(&self, offset: FixedOffset) -> String {
        let start_date = self.start.with_timezone(&offset).date_naive();
        let last_included = self.end - Duration::nanoseconds(1);
        let end_date = last_included.with_timezone(&offset).date_naive() + Duration::days(1);
        format!("{}/{}", date_key(start_date), date_key(end_date))
    }
}

/// The last `days` local dates ending *yesterday* relative to `now` (today itself
/// is excluded — reports only cover completed days). `days` is clamped to `[1, 31]`.
/// Oldest date first.
pub fn build_date_keys(now: DateTime<Utc>, days: u32, offset: FixedOffset) -> Vec<NaiveDate> {
    let days = days.clamp(1, 31);
    let local_today = now.with_timezone(&offset).date_naive();
    (1..=days)
        .rev()
        .map(|back| local_today - Duration::days(back as i64))
        .collect()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
#[path = "time_range_tests.rs"]
mod tests;
