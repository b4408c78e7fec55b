// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns metrics into prose: an LLM-backed analyzer with a deterministic,
//! non-networked fallback that produces the same shape. The fallback is the
//! reference implementation jobs fall back to on any analyzer error, and is
//! the golden-test surface for the rules in play (thresholds, phrasing).

mod anthropic;
mod fallback;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use anthropic::{AnthropicAnalyzer, AnthropicAnalyzerConfig};
pub use fallback::{get_fallback_analysis, get_fallback_weekly_analysis};

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeAnalyzer;

use async_trait::async_trait;
use awa_core::{AnalysisResult, DailyMetrics, ProjectUsage, WeeklyAnalysisResult};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("analyzer configuration error: {0}")]
    Config(String),
    #[error("analyzer API error: {0}")]
    Api(String),
    #[error("analyzer response did not match the expected shape: {0}")]
    Parse(String),
}

/// Everything the daily analysis prompt is built from.
#[derive(Debug, Clone)]
pub struct DailyAnalysisInput<'a> {
    pub date: &'a str,
    pub metrics: &'a DailyMetrics,
}

/// Everything the weekly analysis prompt is built from.
#[derive(Debug, Clone)]
pub struct WeeklyAnalysisInput<'a> {
    pub date_range: &'a str,
    pub total_work_seconds: f64,
    pub avg_work_seconds_per_day: f64,
    pub days_with_data: usize,
    pub avg_wake_minutes: Option<f64>,
    pub avg_sleep_minutes: Option<f64>,
    pub top_projects: &'a [ProjectUsage],
}

#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn generate(&self, input: &DailyAnalysisInput<'_>) -> Result<AnalysisResult, AnalyzerError>;

    async fn generate_weekly(
        &self,
        input: &WeeklyAnalysisInput<'_>,
    ) -> Result<WeeklyAnalysisResult, AnalyzerError>;
}
