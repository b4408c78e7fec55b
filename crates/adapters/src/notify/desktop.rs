// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;

/// Delivers via the OS notification center, using `notify-rust`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifyAdapter;

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let title = title.to_string();
        let message = message.to_string();

        tokio::task::spawn_blocking(move || {
            // macOS's notification center looks up the bundle identifier via an
            // AppleScript round trip unless one is pre-set; that lookup blocks
            // for multiple seconds on an unbundled binary.
            #[cfg(target_os = "macos")]
            {
                let _ = mac_notification_sys::set_application("com.apple.Terminal");
            }

            notify_rust::Notification::new()
                .summary(&title)
                .body(&message)
                .show()
                .map(|_| ())
        })
        .await
        .map_err(|e| NotifyError::SendFailed(e.to_string()))?
        .map_err(|e| NotifyError::SendFailed(e.to_string()))
    }
}
