// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Anthropic Messages API-shaped analyzer: a single non-streaming call that
//! asks the model for a JSON object matching `AnalysisResult` /
//! `WeeklyAnalysisResult`'s field names exactly.

use super::{Analyzer, AnalyzerError, DailyAnalysisInput, WeeklyAnalysisInput};
use crate::http::{Body, HttpClient, HttpError};
use async_trait::async_trait;
use awa_core::{format_duration_long, AnalysisResult, WeeklyAnalysisResult};
use serde_json::{json, Value};

const DAILY_SYSTEM_PROMPT: &str = "You are a terse personal-analytics coach. Given a day's \
activity metrics, respond with a single JSON object with exactly these fields: \
\"summary\" (one sentence), \"insights\" (1-4 short strings), \"tip\" (one actionable \
sentence). No prose outside the JSON object.";

const WEEKLY_SYSTEM_PROMPT: &str = "You are a terse personal-analytics coach. Given a week's \
activity metrics, respond with a single JSON object with exactly these fields: \"title\", \
\"summary\", \"insights\" (1-4 short strings), \"nextAction\". No prose outside the JSON object.";

#[derive(Debug, Clone)]
pub struct AnthropicAnalyzerConfig {
    pub api_key: String,
    pub base_url: String,
    pub version: String,
    pub model: String,
    pub max_tokens: u32,
}

impl AnthropicAnalyzerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.anthropic.com".to_string(),
            version: "2023-06-01".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 1024,
        }
    }
}

pub struct AnthropicAnalyzer<H: HttpClient> {
    http: H,
    config: AnthropicAnalyzerConfig,
}

impl<H: HttpClient> AnthropicAnalyzer<H> {
    pub fn new(http: H, config: AnthropicAnalyzerConfig) -> Self {
        Self { http, config }
    }

    async fn call(&self, system: &str, user_prompt: String) -> Result<Value, AnalyzerError> {
        if self.config.api_key.trim().is_empty() {
            return Err(AnalyzerError::Config("LLM API key is not set".into()));
        }

        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": system,
            "messages": [{ "role": "user", "content": user_prompt }],
        });

        let resp = self
            .http
            .post(
                &url,
                &[("x-api-key", self.config.api_key.as_str()), ("anthropic-version", self.config.version.as_str())],
                Body::Json(body),
            )
            .await
            .map_err(map_http_err)?;

        if !resp.is_success() {
            return Err(AnalyzerError::Api(format!("status {}: {}", resp.status, resp.body)));
        }

        let envelope: Value = resp
            .json()
            .map_err(|e| AnalyzerError::Parse(format!("response was not valid JSON: {e}")))?;

        let text = envelope["content"][0]["text"]
            .as_str()
            .ok_or_else(|| AnalyzerError::Parse("response had no text content block".into()))?;

        serde_json::from_str(text)
            .map_err(|e| AnalyzerError::Parse(format!("model response was not the expected JSON shape: {e}")))
    }
}

fn map_http_err(err: HttpError) -> AnalyzerError {
    AnalyzerError::Api(err.to_string())
}

#[async_trait]
impl<H: HttpClient> Analyzer for AnthropicAnalyzer<H> {
    async fn generate(&self, input: &DailyAnalysisInput<'_>) -> Result<AnalysisResult, AnalyzerError> {
        let top_apps = input
            .metrics
            .top_apps
            .iter()
            .map(|a| format!("{} ({})", a.app, format_duration_long(a.seconds as u64)))
            .collect::<Vec<_>>()
            .join(", ");
        let prompt = format!(
            "Date: {}\nWork: {}\nLongest focus: {}\nNight work: {}\nTop apps: {}",
            input.date,
            format_duration_long(input.metrics.work_seconds as u64),
            format_duration_long(input.metrics.max_continuous_seconds as u64),
            format_duration_long(input.metrics.night_work_seconds as u64),
            top_apps,
        );

        let value = self.call(DAILY_SYSTEM_PROMPT, prompt).await?;
        let result: AnalysisResult = serde_json::from_value(value)
            .map_err(|e| AnalyzerError::Parse(format!("missing/mistyped field: {e}")))?;
        validate_daily(&result)?;
        Ok(result)
    }

    async fn generate_weekly(
        &self,
        input: &WeeklyAnalysisInput<'_>,
    ) -> Result<WeeklyAnalysisResult, AnalyzerError> {
        let top_projects = input
            .top_projects
            .iter()
            .map(|p| format!("{} ({})", p.project, format_duration_long(p.seconds as u64)))
            .collect::<Vec<_>>()
            .join(", ");
        let prompt = format!(
            "Week: {}\nTotal work: {}\nAvg/day: {}\nDays with data: {}\nTop projects: {}",
            input.date_range,
            format_duration_long(input.total_work_seconds as u64),
            format_duration_long(input.avg_work_seconds_per_day as u64),
            input.days_with_data,
            top_projects,
        );

        let value = self.call(WEEKLY_SYSTEM_PROMPT, prompt).await?;
        let result: WeeklyAnalysisResult = serde_json::from_value(value)
            .map_err(|e| AnalyzerError::Parse(format!("missing/mistyped field: {e}")))?;
        validate_weekly(&result)?;
        Ok(result)
    }
}

fn validate_daily(result: &AnalysisResult) -> Result<(), AnalyzerError> {
    if result.summary.trim().is_empty() {
        return Err(AnalyzerError::Parse("summary must not be empty".into()));
    }
    if result.insights.is_empty() {
        return Err(AnalyzerError::Parse("insights must contain at least one entry".into()));
    }
    if result.tip.trim().is_empty() {
        return Err(AnalyzerError::Parse("tip must not be empty".into()));
    }
    Ok(())
}

fn validate_weekly(result: &WeeklyAnalysisResult) -> Result<(), AnalyzerError> {
    if result.title.trim().is_empty()
        || result.summary.trim().is_empty()
        || result.next_action.trim().is_empty()
    {
        return Err(AnalyzerError::Parse("title, summary, and nextAction must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "anthropic_tests.rs"]
mod tests;
