// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolves every environment input exactly once, at process start:
//! env-var lookup with typed defaults, validated at the boundary, never
//! re-read inside business logic.

use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_ACTIVITY_BASE_URL: &str = "http://localhost:5600";
const DEFAULT_LOG_LEVEL: &str = "info";
/// JST, the timezone the source configuration targets. A parameter, not a
/// constant baked into the binner — this is just its default.
const DEFAULT_TZ_OFFSET_MINUTES: i32 = 9 * 60;
const DEFAULT_DAILY_SUMMARY_HOUR: u32 = 21;
const DEFAULT_DAILY_SUMMARY_MINUTE: u32 = 0;
const DEFAULT_CONTINUOUS_WORK_THRESHOLD_SECONDS: f64 = 2.0 * 3600.0;
const DEFAULT_CONTINUOUS_WORK_COOLDOWN_MS: i64 = 60 * 60 * 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("could not determine a home directory for the default state path")]
    NoHomeDir,
}

/// Log level as resolved from `AW_ANALYZER_LOG_LEVEL` / `RUST_LOG` / flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARN" | "WARNING" => Some(Self::Warn),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The resolved, typed view of every environment input this process reads.
/// Built once by the CLI entry point and threaded down by reference; no
/// component re-reads `std::env`.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: Option<String>,
    pub llm_model: Option<String>,
    pub chat_webhook_url: Option<String>,
    pub chat_bot_token: Option<String>,
    pub chat_channel_id: Option<String>,
    pub activity_base_url: String,
    pub hostname: String,
    pub dashboard_base_url: Option<String>,
    pub log_level: LogLevel,
    pub state_path: PathBuf,
    /// Minutes east of UTC for every local-date computation the binner,
    /// sleep analyzer, and daily-marker jobs perform. Defaults to JST.
    pub tz_offset_minutes: i32,
    pub daily_summary_target_hour: u32,
    pub daily_summary_target_minute: u32,
    pub continuous_work_threshold_seconds: f64,
    pub continuous_work_cooldown_ms: i64,
}

impl Config {
    #[allow(clippy::expect_used)]
    pub fn tz_offset(&self) -> chrono::FixedOffset {
        chrono::FixedOffset::east_opt(self.tz_offset_minutes * 60)
            .unwrap_or_else(|| chrono::FixedOffset::east_opt(0).expect("zero offset is always valid"))
    }
}

impl Config {
    /// Resolve every environment input into a typed `Config`. Missing
    /// optional values fall back to documented defaults; a syntactically
    /// invalid value is a `ConfigError` surfaced before any job runs.
    pub fn load() -> Result<Self, ConfigError> {
        let llm_api_key = non_empty_env("AW_ANALYZER_LLM_API_KEY");
        let llm_model = non_empty_env("AW_ANALYZER_LLM_MODEL");
        let chat_webhook_url = non_empty_env("AW_ANALYZER_CHAT_WEBHOOK_URL");
        let chat_bot_token = non_empty_env("AW_ANALYZER_CHAT_BOT_TOKEN");
        let chat_channel_id = non_empty_env("AW_ANALYZER_CHAT_CHANNEL_ID");
        let dashboard_base_url = non_empty_env("AW_ANALYZER_DASHBOARD_BASE_URL");

        let activity_base_url =
            non_empty_env("AW_ANALYZER_ACTIVITY_BASE_URL").unwrap_or_else(|| DEFAULT_ACTIVITY_BASE_URL.to_string());

        let hostname = non_empty_env("AW_ANALYZER_HOSTNAME").unwrap_or_else(default_hostname);

        let log_level = match non_empty_env("AW_ANALYZER_LOG_LEVEL") {
            Some(value) => LogLevel::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                name: "AW_ANALYZER_LOG_LEVEL",
                value: value.clone(),
            })?,
            None => LogLevel::parse(DEFAULT_LOG_LEVEL).unwrap_or(LogLevel::Info),
        };

        let state_path = match non_empty_env("AW_ANALYZER_STATE_PATH") {
            Some(value) => PathBuf::from(value),
            None => default_state_path()?,
        };

        let tz_offset_minutes = parse_env_or_default(
            "AW_ANALYZER_TZ_OFFSET_MINUTES",
            DEFAULT_TZ_OFFSET_MINUTES,
            |v| v.parse::<i32>().ok(),
        )?;
        let daily_summary_target_hour = parse_env_or_default(
            "AW_ANALYZER_DAILY_SUMMARY_HOUR",
            DEFAULT_DAILY_SUMMARY_HOUR,
            |v| v.parse::<u32>().ok().filter(|h| *h < 24),
        )?;
        let daily_summary_target_minute = parse_env_or_default(
            "AW_ANALYZER_DAILY_SUMMARY_MINUTE",
            DEFAULT_DAILY_SUMMARY_MINUTE,
            |v| v.parse::<u32>().ok().filter(|m| *m < 60),
        )?;
        let continuous_work_threshold_seconds = parse_env_or_default(
            "AW_ANALYZER_CONTINUOUS_WORK_THRESHOLD_SECONDS",
            DEFAULT_CONTINUOUS_WORK_THRESHOLD_SECONDS,
            |v| v.parse::<f64>().ok().filter(|s| *s >= 0.0),
        )?;
        let continuous_work_cooldown_ms = parse_env_or_default(
            "AW_ANALYZER_CONTINUOUS_WORK_COOLDOWN_MS",
            DEFAULT_CONTINUOUS_WORK_COOLDOWN_MS,
            |v| v.parse::<i64>().ok().filter(|ms| *ms >= 0),
        )?;

        Ok(Self {
            llm_api_key,
            llm_model,
            chat_webhook_url,
            chat_bot_token,
            chat_channel_id,
            activity_base_url,
            hostname,
            dashboard_base_url,
            log_level,
            state_path,
            tz_offset_minutes,
            daily_summary_target_hour,
            daily_summary_target_minute,
            continuous_work_threshold_seconds,
            continuous_work_cooldown_ms,
        })
    }
}

/// Parses `key`'s value with `parse`, falling back to `default` if unset.
/// An explicitly-set value that fails to parse is a `ConfigError`, not a
/// silent fallback — the same boundary-validation policy as `log_level`.
fn parse_env_or_default<T: Copy>(
    name: &'static str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    match non_empty_env(name) {
        Some(value) => parse(&value).ok_or(ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn default_hostname() -> String {
    hostname_from_os().unwrap_or_else(|| "localhost".to_string())
}

#[cfg(unix)]
fn hostname_from_os() -> Option<String> {
    std::process::Command::new("hostname")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(not(unix))]
fn hostname_from_os() -> Option<String> {
    None
}

fn default_state_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".aw-analyzer").join("state.json"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
