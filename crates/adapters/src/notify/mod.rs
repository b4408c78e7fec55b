// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local OS notification delivery.

mod desktop;
mod noop;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use desktop::DesktopNotifyAdapter;
pub use noop::NoopNotifyAdapter;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifyAdapter;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),
}

#[async_trait]
pub trait NotifyAdapter: Send + Sync {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}
