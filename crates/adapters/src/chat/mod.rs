// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat delivery: an incoming webhook for block-structured messages, and a
//! three-leg external file upload for images.

mod upload;
mod webhook;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use upload::{UploadAdapter, UploadError, UploadOutcome, UploadRequest, WebApiUploadAdapter};
pub use webhook::{ChatError, IncomingWebhookAdapter, WebhookAdapter, WebhookMessage};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeUploadAdapter, FakeWebhookAdapter};
