// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::ProviderError;
use crate::http::{Body, HttpClient, HttpError};
use async_trait::async_trait;
use awa_core::{AfkEvent, AfkMetrics, AfkStatus, AppUsage, DailyMetrics, EditorProjectMetrics, ProjectUsage, TimeRange};
use chrono::FixedOffset;
use serde_json::Value;
use std::collections::HashMap;

const WINDOW_PREFIX: &str = "aw-watcher-window_";
const AFK_PREFIX: &str = "aw-watcher-afk_";
const EDITOR_PREFIXES: [&str; 2] = ["aw-watcher-vscode_", "aw-watcher-vim_"];

/// Discovers buckets and composes server-side queries against an
/// ActivityWatch-shaped HTTP API.
pub struct AwActivityProvider<H: HttpClient> {
    http: H,
    base_url: String,
    offset: FixedOffset,
}

impl<H: HttpClient> AwActivityProvider<H> {
    /// `offset` is the local timezone used to translate a `TimeRange`'s UTC
    /// instants into the server's date-granularity query period.
    pub fn new(http: H, base_url: impl Into<String>, offset: FixedOffset) -> Self {
        Self { http, base_url: base_url.into(), offset }
    }

    async fn list_buckets(&self) -> Result<Value, ProviderError> {
        let url = format!("{}/api/0/buckets/", self.base_url.trim_end_matches('/'));
        let resp = self.http.get(&url, &[]).await.map_err(map_connection_err)?;
        if !resp.is_success() {
            return Err(ProviderError::Connection(format!("status {}: {}", resp.status, resp.body)));
        }
        resp.json().map_err(|e| ProviderError::Parse(e.to_string()))
    }

    async fn find_bucket(&self, buckets: &Value, prefixes: &[&str]) -> Option<String> {
        buckets.as_object().and_then(|map| {
            map.keys().find(|key| prefixes.iter().any(|prefix| key.starts_with(prefix))).cloned()
        })
    }

    async fn required_bucket(&self, buckets: &Value, prefix: &str) -> Result<String, ProviderError> {
        self.find_bucket(buckets, &[prefix])
            .await
            .ok_or_else(|| ProviderError::Connection("Required buckets not found".into()))
    }

    async fn query(&self, statements: &[String], range: &TimeRange) -> Result<Value, ProviderError> {
        let url = format!("{}/api/0/query/", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "query": [statements.join("; ") + ";"],
            "timeperiods": [range.query_period(self.offset)],
        });
        let resp = self
            .http
            .post(&url, &[], Body::Json(body))
            .await
            .map_err(map_connection_err)?;
        if !resp.is_success() {
            return Err(ProviderError::Query { status: resp.status, body: resp.body });
        }
        let array: Value = resp.json().map_err(|e| ProviderError::Parse(e.to_string()))?;
        array
            .as_array()
            .and_then(|results| results.first())
            .cloned()
            .ok_or_else(|| ProviderError::Parse("empty query result array".into()))
    }
}

fn map_connection_err(err: HttpError) -> ProviderError {
    ProviderError::Connection(err.to_string())
}

fn merged_events(value: &Value) -> Result<Vec<(String, f64)>, ProviderError> {
    let events = value
        .as_array()
        .ok_or_else(|| ProviderError::Parse("expected an array of merged events".into()))?;
    events
        .iter()
        .map(|event| {
            let key = event["data"]
                .as_object()
                .and_then(|data| data.values().next())
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string();
            let duration = event["duration"].as_f64().ok_or_else(|| ProviderError::Parse("event missing duration".into()))?;
            Ok((key, duration))
        })
        .collect()
}

#[async_trait]
impl<H: HttpClient> super::ActivityProvider for AwActivityProvider<H> {
    async fn daily_metrics(&self, range: &TimeRange) -> Result<DailyMetrics, ProviderError> {
        let buckets = self.list_buckets().await?;
        let window_bucket = self.required_bucket(&buckets, WINDOW_PREFIX).await?;
        let afk_bucket = self.required_bucket(&buckets, AFK_PREFIX).await?;

        let statements = vec![
            format!("events = query_bucket(\"{window_bucket}\");"),
            format!("afk_events = query_bucket(\"{afk_bucket}\");"),
            "not_afk = filter_keyvals(afk_events, \"status\", [\"not-afk\"]);".to_string(),
            "events = filter_period_intersect(events, not_afk);".to_string(),
            "events = merge_events_by_keys(events, [\"app\"]);".to_string(),
            "events = sort_by_duration(events);".to_string(),
            "RETURN = events;".to_string(),
        ];
        let result = self.query(&statements, range).await?;
        let merged = merged_events(&result)?;

        let mut totals: HashMap<String, f64> = HashMap::new();
        let mut max_continuous = 0.0_f64;
        for (app, duration) in &merged {
            *totals.entry(app.clone()).or_insert(0.0) += duration;
            max_continuous = max_continuous.max(*duration);
        }

        let mut top_apps: Vec<AppUsage> = totals
            .into_iter()
            .map(|(app, seconds)| AppUsage { app, seconds })
            .collect();
        top_apps.sort_by(|a, b| b.seconds.partial_cmp(&a.seconds).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.app.cmp(&b.app)));
        top_apps.truncate(5);

        let work_seconds = merged.iter().map(|(_, duration)| duration).sum();

        Ok(DailyMetrics {
            work_seconds,
            afk_seconds: 0.0,
            night_work_seconds: 0.0,
            max_continuous_seconds: max_continuous,
            top_apps,
        })
    }

    async fn afk_metrics(&self, range: &TimeRange) -> Result<AfkMetrics, ProviderError> {
        let buckets = self.list_buckets().await?;
        let afk_bucket = self.required_bucket(&buckets, AFK_PREFIX).await?;

        let statements = vec![
            format!("events = query_bucket(\"{afk_bucket}\");"),
            "events = filter_keyvals(events, \"status\", [\"afk\", \"not-afk\"]);".to_string(),
            "events = merge_events_by_keys(events, [\"status\"]);".to_string(),
            "events = sort_by_duration(events);".to_string(),
            "RETURN = events;".to_string(),
        ];
        let result = self.query(&statements, range).await?;
        let merged = merged_events(&result)?;

        let mut afk_seconds = 0.0;
        let mut not_afk_seconds = 0.0;
        for (status, duration) in &merged {
            match status.as_str() {
                "afk" => afk_seconds += duration,
                "not-afk" => not_afk_seconds += duration,
                _ => {}
            }
        }

        Ok(AfkMetrics { afk_seconds, not_afk_seconds })
    }

    async fn afk_events(&self, range: &TimeRange) -> Result<Vec<AfkEvent>, ProviderError> {
        let buckets = self.list_buckets().await?;
        let afk_bucket = self.required_bucket(&buckets, AFK_PREFIX).await?;

        let statements = vec![
            format!("events = query_bucket(\"{afk_bucket}\");"),
            "events = filter_keyvals(events, \"status\", [\"afk\", \"not-afk\"]);".to_string(),
            "events = sort_by_timestamp(events);".to_string(),
            "RETURN = events;".to_string(),
        ];
        let result = self.query(&statements, range).await?;
        let raw = result
            .as_array()
            .ok_or_else(|| ProviderError::Parse("expected an array of AFK events".into()))?;

        raw.iter()
            .map(|event| {
                let timestamp_ms = parse_timestamp_ms(&event["timestamp"])?;
                let duration_seconds = event["duration"].as_f64().ok_or_else(|| ProviderError::Parse("event missing duration".into()))?;
                let status_str = event["data"]["status"].as_str().unwrap_or("");
                let status = match status_str {
                    "afk" => AfkStatus::Afk,
                    "not-afk" => AfkStatus::NotAfk,
                    _ => AfkStatus::Other,
                };
                Ok(AfkEvent { timestamp_ms, duration_seconds, status })
            })
            .collect()
    }

    async fn editor_projects(&self, range: &TimeRange) -> Result<EditorProjectMetrics, ProviderError> {
        let buckets = self.list_buckets().await?;
        let Some(editor_bucket) = self.find_bucket(&buckets, &EDITOR_PREFIXES).await else {
            return Ok(EditorProjectMetrics::default());
        };
        let afk_bucket = self.required_bucket(&buckets, AFK_PREFIX).await?;

        let statements = vec![
            format!("events = query_bucket(\"{editor_bucket}\");"),
            format!("afk_events = query_bucket(\"{afk_bucket}\");"),
            "not_afk = filter_keyvals(afk_events, \"status\", [\"not-afk\"]);".to_string(),
            "events = filter_period_intersect(events, not_afk);".to_string(),
            "events = merge_events_by_keys(events, [\"project\"]);".to_string(),
            "events = sort_by_duration(events);".to_string(),
            "RETURN = events;".to_string(),
        ];
        let result = self.query(&statements, range).await?;
        let merged = merged_events(&result)?;

        let mut totals: HashMap<String, f64> = HashMap::new();
        for (project, duration) in merged {
            *totals.entry(last_path_segment(&project)).or_insert(0.0) += duration;
        }
        let mut projects: Vec<ProjectUsage> = totals
            .into_iter()
            .map(|(project, seconds)| ProjectUsage { project, seconds })
            .collect();
        projects.sort_by(|a, b| b.seconds.partial_cmp(&a.seconds).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.project.cmp(&b.project)));

        Ok(EditorProjectMetrics { projects })
    }
}

fn parse_timestamp_ms(value: &Value) -> Result<i64, ProviderError> {
    let text = value.as_str().ok_or_else(|| ProviderError::Parse("event missing timestamp".into()))?;
    chrono::DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| ProviderError::Parse(format!("invalid timestamp {text}: {e}")))
}

fn last_path_segment(path: &str) -> String {
    path.rsplit(['/', '\\']).next().filter(|s| !s.is_empty()).unwrap_or("Unknown").to_string()
}

#[cfg(test)]
#[path = "aw_tests.rs"]
mod tests;
