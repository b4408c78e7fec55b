// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alerts when the current local day's longest continuous-work streak
//! crosses `continuous_work_threshold_seconds`, cooldown-gated so it does
//! not repeat every tick once triggered.

use crate::job::{Job, JobCtx, JobError};
use async_trait::async_trait;
use awa_adapters::provider::ActivityProvider;
use awa_core::{format_duration_long, JobId, JobResult, NotifySpec, TimeRange};
use std::sync::Arc;

pub struct ContinuousWorkAlertJob<P: ActivityProvider> {
    id: JobId,
    provider: Arc<P>,
}

impl<P: ActivityProvider> ContinuousWorkAlertJob<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            id: JobId::new("continuous-work-alert"),
            provider,
        }
    }
}

#[async_trait]
impl<P: ActivityProvider> Job for ContinuousWorkAlertJob<P> {
    fn id(&self) -> &JobId {
        &self.id
    }

    async fn should_run(&self, _ctx: &JobCtx) -> Result<bool, JobError> {
        Ok(true)
    }

    async fn run(&self, ctx: &JobCtx) -> Result<JobResult, JobError> {
        let offset = ctx.config.tz_offset();
        let today = super::local_today(ctx.now, offset);
        let start_of_day = TimeRange::single_day(today, offset).start;
        let range = TimeRange::new(start_of_day, ctx.now);
        let metrics = self
            .provider
            .daily_metrics(&range)
            .await
            .map_err(|e| JobError::from(e.to_string()))?;

        if metrics.max_continuous_seconds < ctx.config.continuous_work_threshold_seconds {
            return Ok(JobResult::no_notify("below continuous-work threshold"));
        }

        let body = format!(
            "You've been working continuously for {}.",
            format_duration_long(metrics.max_continuous_seconds as u64)
        );
        let spec = NotifySpec::new("Take a break", body)
            .with_cooldown(self.id.cooldown_key(), ctx.config.continuous_work_cooldown_ms);
        Ok(JobResult::notify(spec))
    }
}

#[cfg(test)]
#[path = "continuous_work_tests.rs"]
mod tests;
