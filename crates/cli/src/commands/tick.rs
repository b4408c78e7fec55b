// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `aw-analyzer tick` — evaluate every job once and dispatch at most one
//! notification per job, subject to cooldown.

use super::adapters::{build_analyzer, build_jobs, build_notifier, build_provider, build_scheduler, build_webhook, open_state};
use anyhow::{Context, Result};
use awa_engine::Config;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

pub async fn run(config: Arc<Config>, now: DateTime<Utc>) -> Result<()> {
    let state = open_state(&config)?;
    let notifier = build_notifier();
    let provider = build_provider(&config)?;
    let analyzer = build_analyzer(&config)?;
    let webhook = build_webhook(&config)?;
    let jobs = build_jobs(provider, analyzer, webhook);
    let scheduler = build_scheduler(jobs, notifier, state, config);

    let result = scheduler.run_tick(now).await.context("tick failed")?;
    info!(
        executed = result.executed.len(),
        notified = result.notified.len(),
        skipped = result.skipped.len(),
        "tick complete"
    );
    Ok(())
}
