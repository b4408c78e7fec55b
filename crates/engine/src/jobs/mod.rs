// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The reference job library: three jobs that together exercise every
//! adapter the tick engine drives. Each is constructed once at CLI startup
//! with its concrete adapters injected, then handed to the scheduler.

mod continuous_work;
mod daily_report;
mod daily_summary;

pub use continuous_work::ContinuousWorkAlertJob;
pub use daily_report::DailyReportJob;
pub use daily_summary::DailySummaryJob;

use crate::job::JobError;
use awa_core::JobId;
use awa_storage::StateStore;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde_json::Value;

/// The local calendar date `now` falls on, as seen through `offset`.
pub(crate) fn local_today(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

/// True once today's marker has been written: the key already embeds
/// today's date, so this compares the stored value against `date` rather
/// than just checking presence, per the state model's "string marker =
/// same date" contract.
pub(crate) fn marker_already_set(state: &StateStore, job_id: &JobId, date: &str) -> bool {
    state.get(&job_id.daily_marker_key(date)).and_then(Value::as_str) == Some(date)
}

pub(crate) fn write_marker(state: &mut StateStore, job_id: &JobId, date: &str) -> Result<(), JobError> {
    state
        .set(&job_id.daily_marker_key(date), Value::String(date.to_string()))
        .map_err(|e| JobError::from(e.to_string()))
}
