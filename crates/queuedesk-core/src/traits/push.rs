// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Push-notification platform adapters.

use async_trait::async_trait;

use crate::error::QueueDeskError;
use crate::types::NotificationPermission;

/// Source of the device token the backend pushes to.
#[async_trait]
pub trait PushTokenSource: Send + Sync + 'static {
    /// Returns the current device token, or `None` when the platform has none.
    async fn device_token(&self) -> Result<Option<String>, QueueDeskError>;
}

/// Where incoming push messages are surfaced to the user.
pub trait AlertSink: Send + Sync + 'static {
    /// Current OS notification permission.
    fn permission(&self) -> NotificationPermission;

    /// In-app toast.
    fn toast(&self, title: &str);

    /// OS-level notification.
    fn os_notification(&self, title: &str, body: &str);

    /// Audible alert. Playback can be refused by the platform.
    fn play_alert_sound(&self) -> Result<(), QueueDeskError>;
}
