// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Job` trait jobs implement and the context the scheduler threads
//! through every call. Jobs are constructed once at CLI startup, injected
//! with whatever adapters they need, and are read-only for the duration
//! of a tick.

use crate::config::Config;
use async_trait::async_trait;
use awa_core::JobId;
use awa_storage::StateStore;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// Everything a job's `should_run`/`run` can read: the tick's frozen clock
/// reading, the shared state store, and the resolved config. Scheduler and
/// jobs share one instance per tick; nothing here is re-read mid-tick.
pub struct JobCtx {
    pub now: DateTime<Utc>,
    pub state: Arc<Mutex<StateStore>>,
    pub config: Arc<Config>,
}

impl JobCtx {
    pub fn new(now: DateTime<Utc>, state: Arc<Mutex<StateStore>>, config: Arc<Config>) -> Self {
        Self { now, state, config }
    }
}

/// Failures a job's `should_run`/`run` can surface. The scheduler treats
/// every `run` failure as a `provider_error` regardless of which adapter
/// actually failed underneath, per the hard-stop policy in the tick
/// algorithm: a run failure likely indicates a data-layer problem
/// affecting every job, not just this one.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("{0}")]
    Other(String),
}

impl From<String> for JobError {
    fn from(message: String) -> Self {
        Self::Other(message)
    }
}

impl From<&str> for JobError {
    fn from(message: &str) -> Self {
        Self::Other(message.to_string())
    }
}

#[async_trait]
pub trait Job: Send + Sync {
    fn id(&self) -> &JobId;

    async fn should_run(&self, ctx: &JobCtx) -> Result<bool, JobError>;

    async fn run(&self, ctx: &JobCtx) -> Result<awa_core::JobResult, JobError>;
}
