// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Composes `DailyMetrics`/`AnalysisResult` into the fixed block-kit layouts
//! described by the report pipeline, plus a plain-text rendering of the
//! weekly report for delivery channels that only take text + caption.

use crate::analysis::{AnalysisResult, WeeklyAnalysisResult};
use crate::blocks::{Block, BlockMessage, SlackFileRef};
use crate::metrics::{AppUsage, DailyMetrics, ProjectUsage};
use crate::time_fmt::format_duration_long;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];
const WEEKLY_MRKDWN_LIMIT: usize = 3500;

/// Everything [`create_daily_report`] needs beyond the metrics themselves.
#[derive(Debug, Clone)]
pub struct DailyReportContext<'a> {
    pub date: &'a str,
    pub analysis: Option<&'a AnalysisResult>,
    pub dashboard_base_url: Option<&'a str>,
    pub hostname: &'a str,
}

pub fn create_daily_report(metrics: &DailyMetrics, ctx: &DailyReportContext<'_>) -> BlockMessage {
    let mut message = BlockMessage::new(format!("Daily activity report — {}", ctx.date))
        .push(Block::Header {
            text: format!("📊 Daily Report — {}", ctx.date),
        });

    if let Some(analysis) = ctx.analysis {
        message = message.push(Block::Section {
            text: Some(analysis.summary.clone()),
            fields: None,
        });
    }

    message = message
        .push(Block::Divider)
        .push(Block::Fields {
            fields: vec![
                format!("*Work:*\n{}", format_duration_long(metrics.work_seconds as u64)),
                format!(
                    "*Longest focus:*\n{}",
                    format_duration_long(metrics.max_continuous_seconds as u64)
                ),
                format!(
                    "*Night work:*\n{}",
                    format_duration_long(metrics.night_work_seconds as u64)
                ),
                format!("*Date:*\n{}", ctx.date),
            ],
        })
        .push(Block::Divider)
        .push(top_apps_section(&metrics.top_apps));

    if let Some(analysis) = ctx.analysis {
        if !analysis.insights.is_empty() {
            let text = analysis
                .insights
                .iter()
                .map(|i| format!("• {i}"))
                .collect::<Vec<_>>()
                .join("\n");
            message = message
                .push(Block::Divider)
                .push(Block::Section { text: Some(text), fields: None });
        }
        if !analysis.tip.is_empty() {
            message = message
                .push(Block::Divider)
                .push(Block::Context { elements: vec![format!("💡 {}", analysis.tip)] });
        }
    }

    if let Some(base_url) = ctx.dashboard_base_url {
        message = message.push(Block::Divider).push(Block::Section {
            text: Some(format!(
                "<{base_url}/#/timeline?host={}|Open dashboard>",
                ctx.hostname
            )),
            fields: None,
        });
    }

    message
}

fn top_apps_section(top_apps: &[AppUsage]) -> Block {
    let lines = top_apps
        .iter()
        .enumerate()
        .map(|(idx, app)| {
            let rank = MEDALS.get(idx).copied().unwrap_or("•");
            format!("{rank} {} — {}", app.app, format_duration_long(app.seconds as u64))
        })
        .collect::<Vec<_>>()
        .join("\n");
    Block::Section {
        text: Some(if lines.is_empty() {
            "_No app activity recorded._".to_string()
        } else {
            lines
        }),
        fields: None,
    }
}

/// Image reference preference order: `slack_file.id`, then `slack_file.url`,
/// then a direct `image_url`.
#[derive(Debug, Clone)]
pub enum WeeklyImageRef {
    SlackFileId(String),
    SlackFileUrl(String),
    ImageUrl(String),
}

#[derive(Debug, Clone)]
pub struct WeeklyTotals {
    pub total_work_seconds: f64,
    pub avg_work_seconds_per_day: f64,
    pub avg_wake_minutes: Option<f64>,
    pub avg_sleep_minutes: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct WeeklyReportContext<'a> {
    pub date_range: &'a str,
    pub totals: &'a WeeklyTotals,
    pub projects: &'a [ProjectUsage],
    pub image: Option<&'a WeeklyImageRef>,
    pub analysis: &'a WeeklyAnalysisResult,
}

pub fn create_weekly_report(ctx: &WeeklyReportContext<'_>) -> BlockMessage {
    let mut message = BlockMessage::new(format!("Weekly activity report — {}", ctx.date_range))
        .push(Block::Header {
            text: format!("📈 Weekly Report — {}", ctx.date_range),
        })
        .push(Block::Divider)
        .push(Block::Fields {
            fields: vec![
                format!(
                    "*Total work:*\n{}",
                    format_duration_long(ctx.totals.total_work_seconds as u64)
                ),
                format!(
                    "*Avg/day:*\n{}",
                    format_duration_long(ctx.totals.avg_work_seconds_per_day as u64)
                ),
                format!("*Avg wake:*\n{}", format_minute_of_day(ctx.totals.avg_wake_minutes)),
                format!("*Avg sleep:*\n{}", format_minute_of_day(ctx.totals.avg_sleep_minutes)),
            ],
        })
        .push(project_ranking_section(ctx.projects));

    if let Some(image) = ctx.image {
        message = message.push(match image {
            WeeklyImageRef::SlackFileId(id) => Block::Image {
                image_url: None,
                slack_file: Some(SlackFileRef { id: Some(id.clone()), url: None }),
                alt_text: "Activity heatmap".into(),
            },
            WeeklyImageRef::SlackFileUrl(url) => Block::Image {
                image_url: None,
                slack_file: Some(SlackFileRef { id: None, url: Some(url.clone()) }),
                alt_text: "Activity heatmap".into(),
            },
            WeeklyImageRef::ImageUrl(url) => Block::Image {
                image_url: Some(url.clone()),
                slack_file: None,
                alt_text: "Activity heatmap".into(),
            },
        });
    }

    message = message.push(Block::Divider).push(Block::Header {
        text: ctx.analysis.title.clone(),
    });
    message = message.push(Block::Section {
        text: Some(ctx.analysis.summary.clone()),
        fields: None,
    });
    if !ctx.analysis.insights.is_empty() {
        let text = ctx
            .analysis
            .insights
            .iter()
            .map(|i| format!("• {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        message = message.push(Block::Section { text: Some(text), fields: None });
    }

    message.push(Block::Context {
        elements: vec![format!("Next: {}", ctx.analysis.next_action)],
    })
}

fn project_ranking_section(projects: &[ProjectUsage]) -> Block {
    let lines = projects
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let rank = MEDALS.get(idx).copied().unwrap_or("•");
            format!("{rank} {} — {}", p.project, format_duration_long(p.seconds as u64))
        })
        .collect::<Vec<_>>()
        .join("\n");
    Block::Section {
        text: Some(if lines.is_empty() {
            "_No project activity recorded._".to_string()
        } else {
            lines
        }),
        fields: None,
    }
}

fn format_minute_of_day(minutes: Option<f64>) -> String {
    match minutes {
        None => "—".to_string(),
        Some(m) => {
            let m = m.round() as u32 % 1440;
            format!("{:02}:{:02}", m / 60, m % 60)
        }
    }
}

/// Plain-text rendering equivalent to [`create_weekly_report`]'s content,
/// for delivery channels that only accept text + caption (file uploads).
/// Truncated with an ellipsis if it would exceed `WEEKLY_MRKDWN_LIMIT`.
pub fn create_weekly_report_mrkdwn(ctx: &WeeklyReportContext<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format!("*Weekly Report — {}*\n\n", ctx.date_range));
    out.push_str(&format!(
        "Total work: {}\n",
        format_duration_long(ctx.totals.total_work_seconds as u64)
    ));
    out.push_str(&format!(
        "Avg/day: {}\n",
        format_duration_long(ctx.totals.avg_work_seconds_per_day as u64)
    ));
    out.push_str(&format!("Avg wake: {}\n", format_minute_of_day(ctx.totals.avg_wake_minutes)));
    out.push_str(&format!("Avg sleep: {}\n\n", format_minute_of_day(ctx.totals.avg_sleep_minutes)));

    out.push_str("*Projects*\n");
    if ctx.projects.is_empty() {
        out.push_str("_No project activity recorded._\n");
    } else {
        for (idx, p) in ctx.projects.iter().enumerate() {
            let rank = MEDALS.get(idx).copied().unwrap_or("•");
            out.push_str(&format!("{rank} {} — {}\n", p.project, format_duration_long(p.seconds as u64)));
        }
    }

    out.push_str(&format!("\n*{}*\n{}\n", ctx.analysis.title, ctx.analysis.summary));
    for insight in &ctx.analysis.insights {
        out.push_str(&format!("• {insight}\n"));
    }
    out.push_str(&format!("\nNext: {}", ctx.analysis.next_action));

    truncate_with_ellipsis(&out, WEEKLY_MRKDWN_LIMIT)
}

fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(1);
    let truncated: String = text.chars().take(keep).collect();
    format!("{truncated}…")
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
