// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;

/// Discards every notification. Used when local toasts are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifyAdapter;

#[async_trait]
impl NotifyAdapter for NoopNotifyAdapter {
    async fn notify(&self, _title: &str, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
