// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Translates raw activity-server buckets into the fixed-shape metrics core
//! defines, performing bucket discovery and server-side query composition.

mod aw;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use aw::AwActivityProvider;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeActivityProvider;

use async_trait::async_trait;
use awa_core::{AfkEvent, AfkMetrics, DailyMetrics, EditorProjectMetrics, TimeRange};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("query error: status {status}, body: {body}")]
    Query { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
}

#[async_trait]
pub trait ActivityProvider: Send + Sync {
    async fn daily_metrics(&self, range: &TimeRange) -> Result<DailyMetrics, ProviderError>;

    async fn afk_metrics(&self, range: &TimeRange) -> Result<AfkMetrics, ProviderError>;

    async fn afk_events(&self, range: &TimeRange) -> Result<Vec<AfkEvent>, ProviderError>;

    async fn editor_projects(&self, range: &TimeRange) -> Result<EditorProjectMetrics, ProviderError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
