// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-shape metrics DTOs decoded from the activity server and derived by
//! pure transforms (binning, sleep inference). Jobs and the report formatter
//! only ever see these shapes, never the raw server payloads.

use serde::{Deserialize, Serialize};

/// Per-app active seconds, used both for top-app rankings and as the unit
/// merged events decode into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppUsage {
    pub app: String,
    pub seconds: f64,
}

/// Normalized daily work metrics for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub work_seconds: f64,
    pub afk_seconds: f64,
    pub night_work_seconds: f64,
    pub max_continuous_seconds: f64,
    /// Descending by `seconds`, ties broken by app name, truncated to 5.
    pub top_apps: Vec<AppUsage>,
}

impl DailyMetrics {
    pub fn empty() -> Self {
        Self {
            work_seconds: 0.0,
            afk_seconds: 0.0,
            night_work_seconds: 0.0,
            max_continuous_seconds: 0.0,
            top_apps: Vec::new(),
        }
    }
}

/// AFK/not-AFK totals for a window, independent of per-app breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AfkMetrics {
    pub afk_seconds: f64,
    pub not_afk_seconds: f64,
}

/// Status tag on a raw AFK bucket event. Anything else is ignored by the
/// binner and the sleep analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AfkStatus {
    Afk,
    NotAfk,
    #[serde(other)]
    Other,
}

/// A single AFK/not-AFK span as reported by the activity server.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AfkEvent {
    /// Epoch milliseconds of the span start.
    pub timestamp_ms: i64,
    pub duration_seconds: f64,
    pub status: AfkStatus,
}

/// One hour's worth of active/AFK seconds within a local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HourBucket {
    pub active_seconds: f64,
    pub afk_seconds: f64,
}

/// 24 hourly buckets for one local calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyHourlyBuckets {
    pub date: String,
    pub hours: [HourBucket; 24],
}

impl DailyHourlyBuckets {
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            hours: [HourBucket::default(); 24],
        }
    }
}

/// Inferred wake/sleep minute-of-day for one local calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySleepWake {
    pub date: String,
    pub wake_time_minutes: Option<u32>,
    pub sleep_time_minutes: Option<u32>,
}

/// Per-project active seconds derived from editor events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectUsage {
    pub project: String,
    pub seconds: f64,
}

/// Editor/project usage ranking for a window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorProjectMetrics {
    pub projects: Vec<ProjectUsage>,
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
