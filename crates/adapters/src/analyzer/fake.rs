// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{Analyzer, AnalyzerError, DailyAnalysisInput, WeeklyAnalysisInput};
use async_trait::async_trait;
use awa_core::{AnalysisResult, WeeklyAnalysisResult};
use parking_lot::Mutex;

/// Returns a fixed result (or error), and records how many times it was called.
pub struct FakeAnalyzer {
    daily: Result<AnalysisResult, String>,
    weekly: Result<WeeklyAnalysisResult, String>,
    daily_calls: Mutex<usize>,
    weekly_calls: Mutex<usize>,
}

impl FakeAnalyzer {
    pub fn succeeding(daily: AnalysisResult, weekly: WeeklyAnalysisResult) -> Self {
        Self {
            daily: Ok(daily),
            weekly: Ok(weekly),
            daily_calls: Mutex::new(0),
            weekly_calls: Mutex::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            daily: Err(message.clone()),
            weekly: Err(message),
            daily_calls: Mutex::new(0),
            weekly_calls: Mutex::new(0),
        }
    }

    pub fn daily_call_count(&self) -> usize {
        *self.daily_calls.lock()
    }

    pub fn weekly_call_count(&self) -> usize {
        *self.weekly_calls.lock()
    }
}

#[async_trait]
impl Analyzer for FakeAnalyzer {
    async fn generate(&self, _input: &DailyAnalysisInput<'_>) -> Result<AnalysisResult, AnalyzerError> {
        *self.daily_calls.lock() += 1;
        self.daily.clone().map_err(AnalyzerError::Api)
    }

    async fn generate_weekly(
        &self,
        _input: &WeeklyAnalysisInput<'_>,
    ) -> Result<WeeklyAnalysisResult, AnalyzerError> {
        *self.weekly_calls.lock() += 1;
        self.weekly.clone().map_err(AnalyzerError::Api)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
