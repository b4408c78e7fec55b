// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared domain types for the activity analytics agent: time ranges, the
//! fixed-shape metrics DTOs the activity provider decodes into, the job
//! result contract the scheduler consumes, a small clock abstraction, and
//! every pure transform over those shapes — hourly binning, sleep/wake
//! inference, block-kit assembly and validation, and SVG heatmap rendering.
//!
//! This crate has no I/O and no async runtime dependency. Everything here
//! is plain data and pure functions; the crates above it (`awa-storage`,
//! `awa-adapters`, `awa-engine`) own the side effects.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod analysis;
mod binner;
mod blocks;
mod clock;
mod heatmap;
mod job;
mod metrics;
mod report;
mod sleep;
mod time_fmt;
mod time_range;

pub use analysis::{AnalysisResult, WeeklyAnalysisResult};
pub use binner::bin_afk_events;
pub use blocks::{
    validate, Block, BlockMessage, SlackFileRef, Violation, MAX_BLOCKS_PER_MESSAGE,
    MAX_FIELDS_PER_SECTION, MAX_FIELD_CHARS, MAX_HEADER_CHARS, MAX_IMAGE_ALT_CHARS,
    MAX_IMAGE_URL_CHARS, MAX_SECTION_TEXT_CHARS,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use heatmap::render_heatmap_svg;
pub use job::{JobId, JobResult, NotifySpec};
pub use metrics::{
    AfkEvent, AfkMetrics, AfkStatus, AppUsage, DailyHourlyBuckets, DailyMetrics, DailySleepWake,
    EditorProjectMetrics, HourBucket, ProjectUsage,
};
pub use report::{
    create_daily_report, create_weekly_report, create_weekly_report_mrkdwn, DailyReportContext,
    WeeklyImageRef, WeeklyReportContext, WeeklyTotals,
};
pub use sleep::{analyze as analyze_sleep, SleepAnalysis, SLEEP_MIN_SECONDS};
pub use time_fmt::{format_duration_long, format_elapsed};
pub use time_range::{build_date_keys, date_key, TimeRange};
