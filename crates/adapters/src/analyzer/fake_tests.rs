// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use awa_core::DailyMetrics;

fn daily_input(metrics: &DailyMetrics) -> DailyAnalysisInput<'_> {
    DailyAnalysisInput { date: "2026-07-20", metrics }
}

#[tokio::test]
async fn succeeding_fake_returns_configured_result_and_counts_calls() {
    let daily = AnalysisResult { summary: "s".into(), insights: vec!["i".into()], tip: "t".into() };
    let weekly = WeeklyAnalysisResult {
        title: "t".into(),
        summary: "s".into(),
        insights: vec!["i".into()],
        next_action: "n".into(),
    };
    let fake = FakeAnalyzer::succeeding(daily.clone(), weekly.clone());
    let metrics = DailyMetrics::empty();

    let result = fake.generate(&daily_input(&metrics)).await.expect("generate");
    assert_eq!(result, daily);
    assert_eq!(fake.daily_call_count(), 1);

    let weekly_input = WeeklyAnalysisInput {
        date_range: "2026-07-13/2026-07-20",
        total_work_seconds: 0.0,
        avg_work_seconds_per_day: 0.0,
        days_with_data: 0,
        avg_wake_minutes: None,
        avg_sleep_minutes: None,
        top_projects: &[],
    };
    let weekly_result = fake.generate_weekly(&weekly_input).await.expect("generate_weekly");
    assert_eq!(weekly_result, weekly);
    assert_eq!(fake.weekly_call_count(), 1);
}

#[tokio::test]
async fn failing_fake_surfaces_as_api_error() {
    let fake = FakeAnalyzer::failing("boom");
    let metrics = DailyMetrics::empty();
    let err = fake.generate(&daily_input(&metrics)).await.unwrap_err();
    assert!(matches!(err, AnalyzerError::Api(msg) if msg == "boom"));
}
