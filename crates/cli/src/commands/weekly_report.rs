// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `aw-analyzer weekly-report` — fetch each of the trailing N days' metrics,
//! bin hourly activity into a heatmap, infer sleep/wake, rank projects,
//! analyze, and deliver a single chat message. Falls back to printing a
//! plain-text rendering when no webhook is configured.

use super::adapters::{build_analyzer, build_provider, build_uploader, build_webhook};
use anyhow::{Context, Result};
use awa_adapters::analyzer::{get_fallback_weekly_analysis, Analyzer, WeeklyAnalysisInput};
use awa_adapters::chat::{UploadAdapter, UploadRequest, WebhookAdapter};
use awa_adapters::provider::ActivityProvider;
use awa_adapters::rasterize::{NoopRasterizer, Rasterizer};
use awa_core::{
    analyze_sleep, bin_afk_events, build_date_keys, create_weekly_report, create_weekly_report_mrkdwn, date_key,
    render_heatmap_svg, ProjectUsage, TimeRange, WeeklyImageRef, WeeklyReportContext, WeeklyTotals,
};
use awa_engine::Config;
use chrono::{DateTime, Utc};
use clap::Args;
use std::sync::Arc;
use tracing::warn;

const TOP_PROJECT_COUNT: usize = 5;
const HEATMAP_PNG_WIDTH: u32 = 600;
const HEATMAP_PNG_HEIGHT: u32 = 400;

#[derive(Args, Debug)]
pub struct WeeklyReportArgs {
    /// Number of trailing completed days to cover (clamped to 1-31)
    #[arg(long, default_value_t = 7)]
    pub days: u32,
}

pub async fn run(args: WeeklyReportArgs, config: Arc<Config>, now: DateTime<Utc>) -> Result<()> {
    let offset = config.tz_offset();
    let date_keys = build_date_keys(now, args.days, offset);
    let first = *date_keys.first().context("weekly report date range was empty")?;
    let last = *date_keys.last().context("weekly report date range was empty")?;
    let full_range = TimeRange::new(
        TimeRange::single_day(first, offset).start,
        TimeRange::single_day(last, offset).end,
    );

    let provider = build_provider(&config)?;

    let mut total_work_seconds = 0.0;
    let mut days_with_data = 0usize;
    for date in &date_keys {
        let day_range = TimeRange::single_day(*date, offset);
        let metrics = provider
            .daily_metrics(&day_range)
            .await
            .with_context(|| format!("fetching daily metrics for {}", date_key(*date)))?;
        total_work_seconds += metrics.work_seconds;
        if metrics.work_seconds > 0.0 {
            days_with_data += 1;
        }
    }
    let avg_work_seconds_per_day = total_work_seconds / days_with_data.max(1) as f64;

    let afk_events = provider.afk_events(&full_range).await.context("fetching AFK events")?;
    let editor = provider.editor_projects(&full_range).await.context("fetching editor projects")?;
    let top_projects: Vec<ProjectUsage> = editor.projects.into_iter().take(TOP_PROJECT_COUNT).collect();

    let sleep = analyze_sleep(&afk_events, &date_keys, offset);
    let bins = bin_afk_events(&afk_events, &date_keys, offset);
    let heatmap_svg = render_heatmap_svg(&bins);

    let totals = WeeklyTotals {
        total_work_seconds,
        avg_work_seconds_per_day,
        avg_wake_minutes: sleep.avg_wake_minutes,
        avg_sleep_minutes: sleep.avg_sleep_minutes,
    };

    let date_range = format!("{} – {}", date_key(first), date_key(last));
    let weekly_input = WeeklyAnalysisInput {
        date_range: &date_range,
        total_work_seconds,
        avg_work_seconds_per_day,
        days_with_data,
        avg_wake_minutes: totals.avg_wake_minutes,
        avg_sleep_minutes: totals.avg_sleep_minutes,
        top_projects: &top_projects,
    };

    let analyzer = build_analyzer(&config)?;
    let analysis = match analyzer.generate_weekly(&weekly_input).await {
        Ok(analysis) => analysis,
        Err(err) => {
            warn!(error = %err, "weekly analyzer failed; using fallback analysis");
            get_fallback_weekly_analysis(&weekly_input)
        }
    };

    let image = rasterize_and_upload(&config, &heatmap_svg).await;

    let ctx = WeeklyReportContext {
        date_range: &date_range,
        totals: &totals,
        projects: &top_projects,
        image: image.as_ref(),
        analysis: &analysis,
    };

    match build_webhook(&config)? {
        Some(webhook) => {
            let message = create_weekly_report(&ctx);
            webhook.send(&message).await.context("delivering weekly report")?;
        }
        None => println!("{}", create_weekly_report_mrkdwn(&ctx)),
    }

    Ok(())
}

/// Best-effort: rasterizes the heatmap and uploads it as a chat file. Any
/// failure at either step just means the report goes out without an image —
/// rasterization has no production implementation wired in by default.
async fn rasterize_and_upload(config: &Config, svg: &str) -> Option<WeeklyImageRef> {
    let rasterizer = NoopRasterizer;
    let png = match rasterizer.svg_to_png(svg, HEATMAP_PNG_WIDTH, HEATMAP_PNG_HEIGHT).await {
        Ok(png) => png,
        Err(err) => {
            warn!(error = %err, "heatmap rasterization unavailable; posting report without image");
            return None;
        }
    };

    let uploader = match build_uploader(config) {
        Ok(Some(uploader)) => uploader,
        Ok(None) => return None,
        Err(err) => {
            warn!(error = %err, "failed to build upload adapter");
            return None;
        }
    };

    let request = UploadRequest {
        filename: "weekly-heatmap.png".to_string(),
        bytes: png,
        content_type: "image/png".to_string(),
        title: "Weekly activity heatmap".to_string(),
        channel_id: config.chat_channel_id.clone(),
        initial_comment: None,
        share_publicly: true,
    };

    match uploader.upload(request).await {
        Ok(outcome) => Some(match outcome.permalink_public {
            Some(url) => WeeklyImageRef::ImageUrl(url),
            None => WeeklyImageRef::SlackFileId(outcome.file_id),
        }),
        Err(err) => {
            warn!(error = %err, "heatmap upload failed; posting report without image");
            None
        }
    }
}
