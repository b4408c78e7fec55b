// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::{Config, LogLevel};
use awa_adapters::analyzer::fake::FakeAnalyzer;
use awa_adapters::chat::fake::FakeWebhookAdapter;
use awa_adapters::provider::fake::FakeActivityProvider;
use awa_core::{AnalysisResult, DailyMetrics, WeeklyAnalysisResult};
use awa_storage::StateStore;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tempfile::tempdir;

fn test_config() -> Arc<Config> {
    Arc::new(Config {
        llm_api_key: None,
        llm_model: None,
        chat_webhook_url: None,
        chat_bot_token: None,
        chat_channel_id: None,
        activity_base_url: "http://localhost:5600".into(),
        hostname: "test-host".into(),
        dashboard_base_url: None,
        log_level: LogLevel::Info,
        state_path: std::path::PathBuf::from("/dev/null"),
        tz_offset_minutes: 0,
        daily_summary_target_hour: 21,
        daily_summary_target_minute: 0,
        continuous_work_threshold_seconds: 2.0 * 3600.0,
        continuous_work_cooldown_ms: 60 * 60 * 1000,
    })
}

fn test_state() -> (Arc<Mutex<StateStore>>, tempfile::TempDir) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("state.json");
    let store = StateStore::open(path).expect("open");
    (Arc::new(Mutex::new(store)), dir)
}

fn stub_weekly() -> WeeklyAnalysisResult {
    WeeklyAnalysisResult {
        title: "unused".into(),
        summary: "unused".into(),
        insights: Vec::new(),
        next_action: "unused".into(),
    }
}

#[tokio::test]
async fn should_run_false_once_marker_is_set() {
    let (state, _dir) = test_state();
    state.lock().set("daily:daily-report:2026-07-20", serde_json::Value::String("2026-07-20".into())).expect("set");
    let job = DailyReportJob::new(
        Arc::new(FakeActivityProvider::new()),
        Arc::new(FakeAnalyzer::succeeding(
            AnalysisResult { summary: "s".into(), insights: Vec::new(), tip: "t".into() },
            stub_weekly(),
        )),
        None::<Arc<FakeWebhookAdapter>>,
    );
    let ctx = JobCtx::new(Utc.with_ymd_and_hms(2026, 7, 20, 21, 0, 0).unwrap(), state, test_config());
    assert!(!job.should_run(&ctx).await.expect("should_run"));
}

#[tokio::test]
async fn run_delivers_via_webhook_and_writes_marker() {
    let (state, _dir) = test_state();
    let webhook = Arc::new(FakeWebhookAdapter::new());
    let provider = Arc::new(FakeActivityProvider {
        daily_metrics: Some(DailyMetrics { work_seconds: 4.0 * 3600.0, ..DailyMetrics::empty() }),
        ..FakeActivityProvider::new()
    });
    let analyzer = Arc::new(FakeAnalyzer::succeeding(
        AnalysisResult { summary: "good day".into(), insights: vec!["insight".into()], tip: "tip".into() },
        stub_weekly(),
    ));
    let job = DailyReportJob::new(provider, Arc::clone(&analyzer), Some(Arc::clone(&webhook)));
    let now = Utc.with_ymd_and_hms(2026, 7, 20, 21, 0, 0).unwrap();
    let ctx = JobCtx::new(now, Arc::clone(&state), test_config());

    let result = job.run(&ctx).await.expect("run");
    assert!(matches!(result, JobResult::Notify(_)));
    assert_eq!(webhook.sent().len(), 1);
    assert_eq!(analyzer.daily_call_count(), 1);
    assert_eq!(
        state.lock().get("daily:daily-report:2026-07-20"),
        Some(&serde_json::Value::String("2026-07-20".into()))
    );
}

#[tokio::test]
async fn analyzer_failure_falls_back_and_still_delivers() {
    let (state, _dir) = test_state();
    let webhook = Arc::new(FakeWebhookAdapter::new());
    let provider = Arc::new(FakeActivityProvider::new());
    let analyzer = Arc::new(FakeAnalyzer::failing("rate limited"));
    let job = DailyReportJob::new(provider, analyzer, Some(Arc::clone(&webhook)));
    let now = Utc.with_ymd_and_hms(2026, 7, 20, 21, 0, 0).unwrap();
    let ctx = JobCtx::new(now, state, test_config());

    let result = job.run(&ctx).await.expect("run");
    assert!(matches!(result, JobResult::Notify(_)));
    assert_eq!(webhook.sent().len(), 1);
}

#[tokio::test]
async fn webhook_failure_does_not_fail_the_job() {
    let (state, _dir) = test_state();
    let webhook = Arc::new(FakeWebhookAdapter::failing("rejected"));
    let provider = Arc::new(FakeActivityProvider::new());
    let analyzer = Arc::new(FakeAnalyzer::succeeding(
        AnalysisResult { summary: "s".into(), insights: Vec::new(), tip: "t".into() },
        stub_weekly(),
    ));
    let job = DailyReportJob::new(provider, analyzer, Some(webhook));
    let now = Utc.with_ymd_and_hms(2026, 7, 20, 21, 0, 0).unwrap();
    let ctx = JobCtx::new(now, state, test_config());

    let result = job.run(&ctx).await.expect("run");
    assert!(matches!(result, JobResult::Notify(_)));
}

#[tokio::test]
async fn provider_failure_surfaces_as_job_error() {
    let (state, _dir) = test_state();
    let job = DailyReportJob::new(
        Arc::new(FakeActivityProvider::failing("connection refused")),
        Arc::new(FakeAnalyzer::succeeding(
            AnalysisResult { summary: "s".into(), insights: Vec::new(), tip: "t".into() },
            stub_weekly(),
        )),
        None::<Arc<FakeWebhookAdapter>>,
    );
    let now = Utc.with_ymd_and_hms(2026, 7, 20, 21, 0, 0).unwrap();
    let ctx = JobCtx::new(now, state, test_config());
    assert!(job.run(&ctx).await.is_err());
}
