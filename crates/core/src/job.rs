// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The contract between a job and the scheduler. The `Job` trait itself
//! (with its `async` `should_run`/`run` methods) lives in `awa-engine`,
//! which owns the tokio dependency; this crate only holds the data both
//! sides agree on.

use std::fmt;

/// Unique, stable identifier for a job. Used as the cooldown/daily-marker
/// state-key namespace, so renaming a job resets its history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The reserved state key for this job's cooldown timestamp.
    pub fn cooldown_key(&self) -> String {
        format!("cooldown:{}", self.0)
    }

    /// The reserved state key for this job's daily-emission marker on `date`.
    pub fn daily_marker_key(&self, date: &str) -> String {
        format!("daily:{}:{date}", self.0)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A notification request a job wants dispatched, with optional cooldown gating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifySpec {
    pub title: String,
    pub body: String,
    pub cooldown_key: Option<String>,
    pub cooldown_ms: Option<i64>,
}

impl NotifySpec {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            cooldown_key: None,
            cooldown_ms: None,
        }
    }

    pub fn with_cooldown(mut self, key: impl Into<String>, ms: i64) -> Self {
        self.cooldown_key = Some(key.into());
        self.cooldown_ms = Some(ms);
        self
    }
}

/// What a job's `run` produced for this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobResult {
    NoNotify { reason: String },
    Notify(NotifySpec),
}

impl JobResult {
    pub fn no_notify(reason: impl Into<String>) -> Self {
        Self::NoNotify {
            reason: reason.into(),
        }
    }

    pub fn notify(spec: NotifySpec) -> Self {
        Self::Notify(spec)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
