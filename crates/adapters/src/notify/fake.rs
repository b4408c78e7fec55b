// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyCall {
    pub title: String,
    pub message: String,
}

#[derive(Default)]
struct FakeNotifyState {
    calls: Vec<NotifyCall>,
    fail_with: Option<String>,
}

/// Records every call for assertion; can be configured to fail.
#[derive(Clone, Default)]
pub struct FakeNotifyAdapter {
    state: Arc<Mutex<FakeNotifyState>>,
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        let adapter = Self::default();
        adapter.state.lock().fail_with = Some(message.into());
        adapter
    }

    pub fn calls(&self) -> Vec<NotifyCall> {
        self.state.lock().calls.clone()
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let mut state = self.state.lock();
        if let Some(err) = state.fail_with.clone() {
            return Err(NotifyError::SendFailed(err));
        }
        state.calls.push(NotifyCall {
            title: title.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
