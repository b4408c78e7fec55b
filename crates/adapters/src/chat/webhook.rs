// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Incoming-webhook chat delivery: validates the block tree before sending,
//! refusing to transmit anything that violates the platform's structural
//! limits (see `awa_core::blocks::validate`).

use crate::http::{Body, HttpClient, HttpError};
use async_trait::async_trait;
use awa_core::{validate, BlockMessage};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message failed block validation: {0}")]
    Invalid(String),
    #[error("transport error: {0}")]
    Http(#[from] HttpError),
    #[error("webhook returned non-2xx: status {status}, body: {body}")]
    Rejected { status: u16, body: String },
}

/// A validated block-kit message the caller wants delivered.
pub type WebhookMessage = BlockMessage;

#[async_trait]
pub trait WebhookAdapter: Send + Sync {
    async fn send(&self, message: &WebhookMessage) -> Result<(), ChatError>;
}

pub struct IncomingWebhookAdapter<H: HttpClient> {
    http: H,
    webhook_url: String,
}

impl<H: HttpClient> IncomingWebhookAdapter<H> {
    pub fn new(http: H, webhook_url: impl Into<String>) -> Self {
        Self { http, webhook_url: webhook_url.into() }
    }
}

#[async_trait]
impl<H: HttpClient> WebhookAdapter for IncomingWebhookAdapter<H> {
    async fn send(&self, message: &WebhookMessage) -> Result<(), ChatError> {
        let violations = validate(message);
        if !violations.is_empty() {
            let joined = violations
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ChatError::Invalid(joined));
        }

        let body = json!({
            "text": message.text,
            "blocks": serde_json::to_value(&message.blocks).unwrap_or_default(),
        });

        let resp = self.http.post(&self.webhook_url, &[], Body::Json(body)).await?;
        if !resp.is_success() {
            return Err(ChatError::Rejected { status: resp.status, body: resp.body });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
