// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generates the analyzed daily report and delivers it over the configured
//! chat webhook, falling back to the deterministic analyzer on any
//! analyzer failure so a report is always produced. Raises a local toast
//! confirming generation regardless of delivery outcome.

use super::{local_today, marker_already_set, write_marker};
use crate::job::{Job, JobCtx, JobError};
use async_trait::async_trait;
use awa_adapters::analyzer::{get_fallback_analysis, Analyzer, DailyAnalysisInput};
use awa_adapters::chat::WebhookAdapter;
use awa_adapters::provider::ActivityProvider;
use awa_core::{create_daily_report, date_key, DailyReportContext, JobId, JobResult, NotifySpec, TimeRange};
use chrono::Duration;
use std::sync::Arc;
use tracing::warn;

pub struct DailyReportJob<P: ActivityProvider, A: Analyzer, W: WebhookAdapter> {
    id: JobId,
    provider: Arc<P>,
    analyzer: Arc<A>,
    webhook: Option<Arc<W>>,
}

impl<P: ActivityProvider, A: Analyzer, W: WebhookAdapter> DailyReportJob<P, A, W> {
    pub fn new(provider: Arc<P>, analyzer: Arc<A>, webhook: Option<Arc<W>>) -> Self {
        Self {
            id: JobId::new("daily-report"),
            provider,
            analyzer,
            webhook,
        }
    }
}

#[async_trait]
impl<P: ActivityProvider, A: Analyzer, W: WebhookAdapter> Job for DailyReportJob<P, A, W> {
    fn id(&self) -> &JobId {
        &self.id
    }

    async fn should_run(&self, ctx: &JobCtx) -> Result<bool, JobError> {
        let offset = ctx.config.tz_offset();
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

        let date_str = date_key(yesterday);
        let input = DailyAnalysisInput { date: &date_str, metrics: &metrics };
        let analysis = match self.analyzer.generate(&input).await {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!(job = %self.id, error = %err, "analyzer failed; using fallback analysis");
                get_fallback_analysis(&input)
            }
        };

        let report_ctx = DailyReportContext {
            date: &date_str,
            analysis: Some(&analysis),
            dashboard_base_url: ctx.config.dashboard_base_url.as_deref(),
            hostname: &ctx.config.hostname,
        };
        let message = create_daily_report(&metrics, &report_ctx);

        if let Some(webhook) = &self.webhook {
            if let Err(err) = webhook.send(&message).await {
                warn!(job = %self.id, error = %err, "failed to deliver daily report");
            }
        }

        write_marker(&mut ctx.state.lock(), &self.id, &date_key(today))?;

        Ok(JobResult::notify(NotifySpec::new(
            "Daily report generated",
            format!("Report for {date_str} is ready."),
        )))
    }
}

#[cfg(test)]
#[path = "daily_report_tests.rs"]
mod tests;
