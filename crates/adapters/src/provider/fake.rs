// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{ActivityProvider, ProviderError};
use async_trait::async_trait;
use awa_core::{AfkEvent, AfkMetrics, DailyMetrics, EditorProjectMetrics, TimeRange};

/// Returns fixed, pre-baked results for every call; never touches the network.
#[derive(Clone, Default)]
pub struct FakeActivityProvider {
    pub daily_metrics: Option<DailyMetrics>,
    pub afk_metrics: Option<AfkMetrics>,
    pub afk_events: Vec<AfkEvent>,
    pub editor_projects: EditorProjectMetrics,
    pub fail_with: Option<String>,
}

impl FakeActivityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { fail_with: Some(message.into()), ..Self::default() }
    }
}

#[async_trait]
impl ActivityProvider for FakeActivityProvider {
    async fn daily_metrics(&self, _range: &TimeRange) -> Result<DailyMetrics, ProviderError> {
        if let Some(msg) = &self.fail_with {
            return Err(ProviderError::Connection(msg.clone()));
        }
        Ok(self.daily_metrics.clone().unwrap_or_else(DailyMetrics::empty))
    }

    async fn afk_metrics(&self, _range: &TimeRange) -> Result<AfkMetrics, ProviderError> {
        if let Some(msg) = &self.fail_with {
            return Err(ProviderError::Connection(msg.clone()));
        }
        Ok(self.afk_metrics.unwrap_or(AfkMetrics { afk_seconds: 0.0, not_afk_seconds: 0.0 }))
    }

    async fn afk_events(&self, _range: &TimeRange) -> Result<Vec<AfkEvent>, ProviderError> {
        if let Some(msg) = &self.fail_with {
            return Err(ProviderError::Connection(msg.clone()));
        }
        Ok(self.afk_events.clone())
    }

    async fn editor_projects(&self, _range: &TimeRange) -> Result<EditorProjectMetrics, ProviderError> {
        if let Some(msg) = &self.fail_with {
            return Err(ProviderError::Connection(msg.clone()));
        }
        Ok(self.editor_projects.clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
