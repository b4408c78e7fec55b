// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic, non-networked stand-in for the LLM analyzer. Every job
//! falls back to this on any `AnalyzerError`, so its output must always be
//! coherent prose, never a placeholder.

use super::{DailyAnalysisInput, WeeklyAnalysisInput};
use awa_core::{format_duration_long, AnalysisResult, WeeklyAnalysisResult};

const LONG_FOCUS_THRESHOLD_SECONDS: f64 = 45.0 * 60.0;
const LIGHT_DAY_THRESHOLD_SECONDS: f64 = 2.0 * 3600.0;

pub fn get_fallback_analysis(input: &DailyAnalysisInput<'_>) -> AnalysisResult {
    let metrics = input.metrics;
    let work = format_duration_long(metrics.work_seconds as u64);

    let top_app = metrics.top_apps.first();
    let summary = match top_app {
        Some(app) => format!("You worked {work} on {}, mostly in {}.", input.date, app.app),
        None => format!("You worked {work} on {}.", input.date),
    };

    let mut insights = Vec::new();
    if metrics.max_continuous_seconds >= LONG_FOCUS_THRESHOLD_SECONDS {
        insights.push(format!(
            "Your longest focus streak was {}.",
            format_duration_long(metrics.max_continuous_seconds as u64)
        ));
    }
    if metrics.night_work_seconds > 0.0 {
        insights.push(format!(
            "{} of that was after hours.",
            format_duration_long(metrics.night_work_seconds as u64)
        ));
    }
    if let Some(app) = top_app {
        insights.push(format!("{} was your top app at {}.", app.app, format_duration_long(app.seconds as u64)));
    }
    if insights.is_empty() {
        insights.push("Not much activity was recorded today.".to_string());
    }

    let tip = if metrics.work_seconds < LIGHT_DAY_THRESHOLD_SECONDS {
        "It looks like a light day; consider whether activity tracking is running.".to_string()
    } else if metrics.max_continuous_seconds >= 2.0 * LONG_FOCUS_THRESHOLD_SECONDS {
        "Long focus streaks pay off; keep blocking distractions during deep work.".to_string()
    } else {
        "Try protecting one longer uninterrupted block tomorrow.".to_string()
    };

    AnalysisResult { summary, insights, tip }
}

pub fn get_fallback_weekly_analysis(input: &WeeklyAnalysisInput<'_>) -> WeeklyAnalysisResult {
    let total = format_duration_long(input.total_work_seconds as u64);
    let avg = format_duration_long(input.avg_work_seconds_per_day as u64);

    let title = if input.days_with_data == 0 {
        "A quiet week".to_string()
    } else {
        format!("{total} across {} day(s)", input.days_with_data)
    };

    let summary = format!(
        "You logged {total} of work this week ({}), averaging {avg} per active day.",
        input.date_range
    );

    let mut insights = Vec::new();
    if let Some(top) = input.top_projects.first() {
        insights.push(format!("{} was your top project at {}.", top.project, format_duration_long(top.seconds as u64)));
    }
    match (input.avg_wake_minutes, input.avg_sleep_minutes) {
        (Some(wake), Some(sleep)) => insights.push(format!(
            "You woke around {:02}:{:02} and settled in around {:02}:{:02} on average.",
            wake as u32 / 60,
            wake as u32 % 60,
            sleep as u32 / 60,
            sleep as u32 % 60,
        )),
        _ => insights.push("Not enough sleep-cycle data was recorded this week.".to_string()),
    }
    if insights.is_empty() {
        insights.push("Not much activity was recorded this week.".to_string());
    }

    let next_action = if input.avg_work_seconds_per_day < LIGHT_DAY_THRESHOLD_SECONDS {
        "Check that activity tracking is running consistently next week.".to_string()
    } else {
        "Keep the current pace and protect your best-focus hours.".to_string()
    };

    WeeklyAnalysisResult { title, summary, insights, next_action }
}

#[cfg(test)]
#[path = "fallback_tests.rs"]
mod tests;
