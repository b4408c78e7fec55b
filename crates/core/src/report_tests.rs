// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::metrics::AppUsage;

fn sample_metrics() -> DailyMetrics {
    DailyMetrics {
        work_seconds: 28_800.0,
        afk_seconds: 3_600.0,
        night_work_seconds: 0.0,
        max_continuous_seconds: 5_400.0,
        top_apps: vec![
            AppUsage { app: "VS Code".into(), seconds: 14_400.0 },
            AppUsage { app: "Chrome".into(), seconds: 7_200.0 },
            AppUsage { app: "Slack".into(), seconds: 3_600.0 },
            AppUsage { app: "Terminal".into(), seconds: 1_800.0 },
        ],
    }
}

#[test]
fn daily_report_layout_matches_the_fixed_order() {
    let analysis = AnalysisResult {
        summary: "Solid day".into(),
        insights: vec!["Focused morning".into()],
        tip: "Take a break".into(),
    };
    let ctx = DailyReportContext {
        date: "2026-01-02",
        analysis: Some(&analysis),
        dashboard_base_url: Some("http://localhost:5600"),
        hostname: "host1",
    };
    let message = create_daily_report(&sample_metrics(), &ctx);

    assert!(matches!(message.blocks[0], Block::Header { .. }));
    assert!(matches!(message.blocks[1], Block::Section { .. })); // summary
    assert!(matches!(message.blocks[2], Block::Divider));
    assert!(matches!(message.blocks[3], Block::Fields { .. }));
    assert!(matches!(message.blocks[4], Block::Divider));
    assert!(matches!(message.blocks[5], Block::Section { .. })); // top apps
    assert!(matches!(message.blocks[6], Block::Divider));
    assert!(matches!(message.blocks[7], Block::Section { .. })); // insights
    assert!(matches!(message.blocks[8], Block::Divider));
    assert!(matches!(message.blocks[9], Block::Context { .. })); // tip
    assert!(matches!(message.blocks[10], Block::Divider));
    assert!(matches!(message.blocks[11], Block::Section { .. })); // dashboard link
}

#[test]
fn daily_report_without_analysis_skips_summary_insights_and_tip() {
    let ctx = DailyReportContext {
        date: "2026-01-02",
        analysis: None,
        dashboard_base_url: None,
        hostname: "host1",
    };
    let message = create_daily_report(&sample_metrics(), &ctx);
    assert!(matches!(message.blocks[0], Block::Header { .. }));
    assert!(matches!(message.blocks[1], Block::Divider));
    assert!(matches!(message.blocks[2], Block::Fields { .. }));
}

#[test]
fn top_apps_uses_medals_for_first_three_and_bullet_after() {
    let ctx = DailyReportContext { date: "d", analysis: None, dashboard_base_url: None, hostname: "h" };
    let message = create_daily_report(&sample_metrics(), &ctx);
    let Block::Section { text: Some(text), .. } = &message.blocks[2] else {
        panic!("expected top-apps section");
    };
    assert!(text.starts_with("🥇 VS Code"));
    assert!(text.contains("🥈 Chrome"));
    assert!(text.contains("🥉 Slack"));
    assert!(text.contains("• Terminal"));
}

#[test]
fn fields_are_in_work_max_continuous_night_date_order() {
    let ctx = DailyReportContext { date: "2026-01-02", analysis: None, dashboard_base_url: None, hostname: "h" };
    let message = create_daily_report(&sample_metrics(), &ctx);
    let Block::Fields { fields } = &message.blocks[1] else {
        panic!("expected fields block");
    };
    assert!(fields[0].starts_with("*Work:*"));
    assert!(fields[1].starts_with("*Longest focus:*"));
    assert!(fields[2].starts_with("*Night work:*"));
    assert!(fields[3].starts_with("*Date:*\n2026-01-02"));
}

fn sample_weekly_ctx<'a>(
    analysis: &'a WeeklyAnalysisResult,
    totals: &'a WeeklyTotals,
    projects: &'a [ProjectUsage],
) -> WeeklyReportContext<'a> {
    WeeklyReportContext {
        date_range: "2026-01-01 – 2026-01-07",
        totals,
        projects,
        image: None,
        analysis,
    }
}

#[test]
fn weekly_report_includes_next_action_in_context_footer() {
    let analysis = WeeklyAnalysisResult {
        title: "Great week".into(),
        summary: "You worked a lot".into(),
        insights: vec!["Mornings are strongest".into()],
        next_action: "Protect your evenings".into(),
    };
    let totals = WeeklyTotals {
        total_work_seconds: 7.0 * 3600.0,
        avg_work_seconds_per_day: 3600.0,
        avg_wake_minutes: Some(420.0),
        avg_sleep_minutes: Some(1380.0),
    };
    let projects = vec![ProjectUsage { project: "aw-analyzer".into(), seconds: 3600.0 }];
    let ctx = sample_weekly_ctx(&analysis, &totals, &projects);
    let message = create_weekly_report(&ctx);

    let last = message.blocks.last().expect("at least one block");
    match last {
        Block::Context { elements } => assert!(elements[0].contains("Protect your evenings")),
        other => panic!("expected context block, got {other:?}"),
    }
}

#[test]
fn weekly_report_prefers_slack_file_id_then_url_then_image_url() {
    let analysis = WeeklyAnalysisResult {
        title: "t".into(),
        summary: "s".into(),
        insights: vec![],
        next_action: "n".into(),
    };
    let totals = WeeklyTotals {
        total_work_seconds: 0.0,
        avg_work_seconds_per_day: 0.0,
        avg_wake_minutes: None,
        avg_sleep_minutes: None,
    };
    let image = WeeklyImageRef::SlackFileId("F123".into());
    let mut ctx = sample_weekly_ctx(&analysis, &totals, &[]);
    ctx.image = Some(&image);
    let message = create_weekly_report(&ctx);
    let has_image = message.blocks.iter().any(|b| matches!(b, Block::Image { .. }));
    assert!(has_image);
}

#[test]
fn weekly_mrkdwn_stays_within_limit_and_is_equivalent_content() {
    let analysis = WeeklyAnalysisResult {
        title: "Great week".into(),
        summary: "Summary".into(),
        insights: vec!["insight one".into()],
        next_action: "next action".into(),
    };
    let totals = WeeklyTotals {
        total_work_seconds: 3600.0,
        avg_work_seconds_per_day: 1800.0,
        avg_wake_minutes: Some(420.0),
        avg_sleep_minutes: Some(1380.0),
    };
    let projects = vec![ProjectUsage { project: "proj".into(), seconds: 100.0 }];
    let ctx = sample_weekly_ctx(&analysis, &totals, &projects);
    let text = create_weekly_report_mrkdwn(&ctx);
    assert!(text.len() <= WEEKLY_MRKDWN_LIMIT);
    assert!(text.contains("Great week"));
    assert!(text.contains("next action"));
}

#[test]
fn weekly_mrkdwn_truncates_with_ellipsis_when_over_limit() {
    let analysis = WeeklyAnalysisResult {
        title: "t".into(),
        summary: "x".repeat(5000),
        insights: vec![],
        next_action: "n".into(),
    };
    let totals = WeeklyTotals {
        total_work_seconds: 0.0,
        avg_work_seconds_per_day: 0.0,
        avg_wake_minutes: None,
        avg_sleep_minutes: None,
    };
    let ctx = sample_weekly_ctx(&analysis, &totals, &[]);
    let text = create_weekly_report_mrkdwn(&ctx);
    assert_eq!(text.chars().count(), WEEKLY_MRKDWN_LIMIT);
    assert!(text.ends_with('…'));
}

#[test]
fn minute_of_day_formats_as_hh_mm() {
    assert_eq!(format_minute_of_day(Some(90.0)), "01:30");
    assert_eq!(format_minute_of_day(None), "—");
}
