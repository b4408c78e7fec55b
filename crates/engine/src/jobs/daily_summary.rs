// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Posts a local desktop summary of the prior day's activity once per local
//! calendar day, after a configured target time.

use super::{local_today, marker_already_set, write_marker};
use crate::job::{Job, JobCtx, JobError};
use async_trait::async_trait;
use awa_adapters::provider::ActivityProvider;
use awa_core::{date_key, format_duration_long, JobId, JobResult, NotifySpec, TimeRange};
use chrono::{Duration, NaiveTime};
use std::sync::Arc;

/// Summarizes yesterday's work once the local clock passes
/// `daily_summary_target_hour:minute`, gated by a daily marker so it fires
/// at most once per local day regardless of tick frequency.
pub struct DailySummaryJob<P: ActivityProvider> {
    id: JobId,
    provider: Arc<P>,
}

impl<P: ActivityProvider> DailySummaryJob<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            id: JobId::new("daily-summary"),
            provider,
        }
    }
}

#[async_trait]
impl<P: ActivityProvider> Job for DailySummaryJob<P> {
    fn id(&self) -> &JobId {
        &self.id
    }

    async fn should_run(&self, ctx: &JobCtx) -> Result<bool, JobError> {
        let offset = ctx.config.tz_offset();
        let local_now = ctx.now.with_timezone(&offset);
        let target = NaiveTime::MIN
            + Duration::hours(i64::from(ctx.config.daily_summary_target_hour))
            + Duration::minutes(i64::from(ctx.config.daily_summary_target_minute));
        if local_now.time() < target {
            return Ok(false);
        }
        let today = date_key(local_today(ctx.now, offset));
        Ok(!marker_already_set(&ctx.state.lock(), &self.id, &today))
    }

    async fn run(&self, ctx: &JobCtx) -> Result<JobResult, JobError> {
        let offset = ctx.config.tz_offset();
        let today = local_today(ctx.now, offset);
        let yesterday = today - Duration::days(1);
        let range = TimeRange::single_day(yesterday, offset);
        let metrics = self
            .provider
            .daily_metrics(&range)
            .await
            .map_err(|e| JobError::from(e.to_string()))?;

        write_marker(&mut ctx.state.lock(), &self.id, &date_key(today))?;

        if metrics.work_seconds == 0.0 {
            return Ok(JobResult::no_notify("no activity recorded yesterday"));
        }

        let title = format!("Yesterday: {}", format_duration_long(metrics.work_seconds as u64));
        let body = format!(
            "Longest focus {}, night work {}.",
            format_duration_long(metrics.max_continuous_seconds as u64),
            format_duration_long(metrics.night_work_seconds as u64),
        );
        Ok(JobResult::notify(NotifySpec::new(title, body)))
    }
}

#[cfg(test)]
#[path = "daily_summary_tests.rs"]
mod tests;
