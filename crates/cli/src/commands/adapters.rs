// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires the concrete adapters each command needs from a resolved `Config`.
//! Kept separate from the command bodies so `tick` and `weekly-report`
//! share exactly one construction path per adapter.

use anyhow::{Context, Result};
use async_trait::async_trait;
use awa_adapters::analyzer::{
    AnalyzerError, AnthropicAnalyzer, AnthropicAnalyzerConfig, Analyzer, DailyAnalysisInput, WeeklyAnalysisInput,
};
use awa_adapters::chat::{IncomingWebhookAdapter, WebApiUploadAdapter};
use awa_adapters::http::ReqwestHttpClient;
use awa_adapters::notify::{DesktopNotifyAdapter, NotifyAdapter};
use awa_adapters::provider::AwActivityProvider;
use awa_core::{AnalysisResult, WeeklyAnalysisResult};
use awa_engine::{Config, Job, Scheduler};
use awa_storage::StateStore;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

const QUERY_TIMEOUT: Duration = Duration::from_secs(30);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

pub type Provider = AwActivityProvider<ReqwestHttpClient>;
pub type Webhook = IncomingWebhookAdapter<ReqwestHttpClient>;
pub type Uploader = WebApiUploadAdapter<ReqwestHttpClient>;

/// Wraps the real Anthropic analyzer so an absent API key is just another
/// `AnalyzerError::Config`, handled by the same fallback path every job
/// already takes on analyzer failure — no special-casing in job bodies.
pub enum ConfiguredAnalyzer {
    Anthropic(AnthropicAnalyzer<ReqwestHttpClient>),
    Unconfigured,
}

#[async_trait]
impl Analyzer for ConfiguredAnalyzer {
    async fn generate(&self, input: &DailyAnalysisInput<'_>) -> Result<AnalysisResult, AnalyzerError> {
        match self {
            Self::Anthropic(inner) => inner.generate(input).await,
            Self::Unconfigured => Err(AnalyzerError::Config("AW_ANALYZER_LLM_API_KEY is not set".into())),
        }
    }

    async fn generate_weekly(&self, input: &WeeklyAnalysisInput<'_>) -> Result<WeeklyAnalysisResult, AnalyzerError> {
        match self {
            Self::Anthropic(inner) => inner.generate_weekly(input).await,
            Self::Unconfigured => Err(AnalyzerError::Config("AW_ANALYZER_LLM_API_KEY is not set".into())),
        }
    }
}

pub fn open_state(config: &Config) -> Result<Arc<Mutex<StateStore>>> {
    let store = StateStore::open(config.state_path.clone())
        .with_context(|| format!("opening state store at {}", config.state_path.display()))?;
    Ok(Arc::new(Mutex::new(store)))
}

pub fn build_notifier() -> Arc<dyn NotifyAdapter> {
    Arc::new(DesktopNotifyAdapter)
}

pub fn build_provider(config: &Config) -> Result<Arc<Provider>> {
    let http = ReqwestHttpClient::new(QUERY_TIMEOUT).context("building activity provider HTTP client")?;
    Ok(Arc::new(Provider::new(http, config.activity_base_url.clone(), config.tz_offset())))
}

pub fn build_analyzer(config: &Config) -> Result<Arc<ConfiguredAnalyzer>> {
    let analyzer = match &config.llm_api_key {
        Some(key) => {
            let http = ReqwestHttpClient::new(QUERY_TIMEOUT).context("building analyzer HTTP client")?;
            let mut analyzer_config = AnthropicAnalyzerConfig::new(key.clone());
            if let Some(model) = &config.llm_model {
                analyzer_config.model = model.clone();
            }
            ConfiguredAnalyzer::Anthropic(AnthropicAnalyzer::new(http, analyzer_config))
        }
        None => ConfiguredAnalyzer::Unconfigured,
    };
    Ok(Arc::new(analyzer))
}

pub fn build_webhook(config: &Config) -> Result<Option<Arc<Webhook>>> {
    let Some(url) = &config.chat_webhook_url else {
        return Ok(None);
    };
    let http = ReqwestHttpClient::new(QUERY_TIMEOUT).context("building webhook HTTP client")?;
    Ok(Some(Arc::new(Webhook::new(http, url.clone()))))
}

pub fn build_uploader(config: &Config) -> Result<Option<Arc<Uploader>>> {
    let Some(token) = &config.chat_bot_token else {
        return Ok(None);
    };
    let http = ReqwestHttpClient::new(UPLOAD_TIMEOUT).context("building upload HTTP client")?;
    Ok(Some(Arc::new(Uploader::new(http, "https://slack.com/api", token.clone()))))
}

pub fn build_jobs(
    provider: Arc<Provider>,
    analyzer: Arc<ConfiguredAnalyzer>,
    webhook: Option<Arc<Webhook>>,
) -> Vec<Box<dyn Job>> {
    vec![
        Box::new(awa_engine::jobs::DailySummaryJob::new(Arc::clone(&provider))),
        Box::new(awa_engine::jobs::ContinuousWorkAlertJob::new(Arc::clone(&provider))),
        Box::new(awa_engine::jobs::DailyReportJob::new(provider, analyzer, webhook)),
    ]
}

pub fn build_scheduler(
    jobs: Vec<Box<dyn Job>>,
    notifier: Arc<dyn NotifyAdapter>,
    state: Arc<Mutex<StateStore>>,
    config: Arc<Config>,
) -> Scheduler {
    Scheduler::new(jobs, notifier, state, config)
}
