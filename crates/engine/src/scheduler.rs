// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The tick engine: evaluates an ordered list of jobs and dispatches
//! at-most-one notification per job per tick, subject to cooldown.

use crate::config::Config;
use crate::job::{Job, JobCtx};
use awa_adapters::notify::NotifyAdapter;
use awa_core::{JobId, JobResult};
use awa_storage::StateStore;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("job {job_id} failed to run: {source}")]
    ProviderError { job_id: JobId, source: String },
    #[error("job {job_id} failed to notify: {source}")]
    NotifierError { job_id: JobId, source: String },
}

/// What a completed (or aborted) tick produced, in job-order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    pub executed: Vec<JobId>,
    pub notified: Vec<JobId>,
    pub skipped: Vec<JobId>,
}

pub struct Scheduler {
    jobs: Vec<Box<dyn Job>>,
    notifier: Arc<dyn NotifyAdapter>,
    state: Arc<Mutex<StateStore>>,
    config: Arc<Config>,
}

impl Scheduler {
    pub fn new(
        jobs: Vec<Box<dyn Job>>,
        notifier: Arc<dyn NotifyAdapter>,
        state: Arc<Mutex<StateStore>>,
        config: Arc<Config>,
    ) -> Self {
        Self { jobs, notifier, state, config }
    }

    pub async fn run_tick(&self, now: DateTime<Utc>) -> Result<TickResult, SchedulerError> {
        let ctx = JobCtx::new(now, Arc::clone(&self.state), Arc::clone(&self.config));
        let mut result = TickResult::default();

        for job in &self.jobs {
            let job_id = job.id().clone();

            let should_run = match job.should_run(&ctx).await {
                Ok(should_run) => should_run,
                Err(err) => {
                    warn!(job = %job_id, error = %err, "should_run failed; skipping job");
                    result.skipped.push(job_id);
                    continue;
                }
            };

            if !should_run {
                info!(job = %job_id, "should_run=false; skipping job");
                result.skipped.push(job_id);
                continue;
            }

            let job_result = job.run(&ctx).await.map_err(|err| SchedulerError::ProviderError {
                job_id: job_id.clone(),
                source: err.to_string(),
            })?;

            result.executed.push(job_id.clone());

            let spec = match job_result {
                JobResult::NoNotify { reason } => {
                    info!(job = %job_id, reason, "job produced no notification");
                    continue;
                }
                JobResult::Notify(spec) => spec,
            };

            if let (Some(cooldown_key), Some(cooldown_ms)) = (&spec.cooldown_key, spec.cooldown_ms) {
                let last_ts = self.state.lock().get_time(cooldown_key);
                if let Some(last_ts) = last_ts {
                    if now.timestamp_millis() - last_ts < cooldown_ms {
                        info!(job = %job_id, "notification suppressed by cooldown");
                        continue;
                    }
                }
            }

            self.notifier
                .notify(&spec.title, &spec.body)
                .await
                .map_err(|err| SchedulerError::NotifierError { job_id: job_id.clone(), source: err.to_string() })?;

            result.notified.push(job_id.clone());

            if let Some(cooldown_key) = &spec.cooldown_key {
                let mut state = self.state.lock();
                if let Err(err) = state.set_time(cooldown_key, now.timestamp_millis()) {
                    warn!(job = %job_id, error = %err, "failed to persist cooldown timestamp");
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
