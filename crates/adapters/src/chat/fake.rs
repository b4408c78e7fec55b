// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::upload::{UploadAdapter, UploadError, UploadOutcome, UploadRequest};
use super::webhook::{ChatError, WebhookAdapter, WebhookMessage};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Records every send for assertion; can be configured to fail.
#[derive(Clone, Default)]
pub struct FakeWebhookAdapter {
    sent: Arc<Mutex<Vec<WebhookMessage>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl FakeWebhookAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        let adapter = Self::default();
        *adapter.fail_with.lock() = Some(message.into());
        adapter
    }

    pub fn sent(&self) -> Vec<WebhookMessage> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl WebhookAdapter for FakeWebhookAdapter {
    async fn send(&self, message: &WebhookMessage) -> Result<(), ChatError> {
        if let Some(err) = self.fail_with.lock().clone() {
            return Err(ChatError::Rejected { status: 500, body: err });
        }
        self.sent.lock().push(message.clone());
        Ok(())
    }
}

/// Records every upload for assertion; returns a fixed outcome.
#[derive(Clone)]
pub struct FakeUploadAdapter {
    requests: Arc<Mutex<Vec<UploadRequest>>>,
    outcome: Result<UploadOutcome, String>,
}

impl FakeUploadAdapter {
    pub fn succeeding(outcome: UploadOutcome) -> Self {
        Self { requests: Arc::new(Mutex::new(Vec::new())), outcome: Ok(outcome) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { requests: Arc::new(Mutex::new(Vec::new())), outcome: Err(message.into()) }
    }

    pub fn requests(&self) -> Vec<UploadRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl UploadAdapter for FakeUploadAdapter {
    async fn upload(&self, request: UploadRequest) -> Result<UploadOutcome, UploadError> {
        self.requests.lock().push(request);
        self.outcome.clone().map_err(UploadError::Api)
    }
}
