// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery of incoming push payloads.
//!
//! While the client is in the background every payload becomes an OS
//! notification. In the foreground nothing is shown until staff or customer
//! has enabled sound once; after that each payload raises a toast, and when
//! the OS grants notification permission also an OS notification and the
//! alert sound.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use queuedesk_core::{AlertSink, NotificationPermission, PushPayload};
use tracing::{debug, warn};

/// Title used when a payload has none.
pub const DEFAULT_TITLE: &str = "Notification";

/// Whether the client window currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Foreground,
    Background,
}

/// What [`PushBridge::deliver`] did with a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Shown as an OS notification by the background channel.
    Background,
    /// Dropped: foreground handling is off until sound is enabled.
    Suppressed,
    /// Toast only; OS notifications are not permitted.
    Toast,
    /// Toast, OS notification and alert sound.
    ToastAndAlert,
}

pub struct PushBridge {
    sink: Arc<dyn AlertSink>,
    sound_enabled: AtomicBool,
}

impl PushBridge {
    pub fn new(sink: Arc<dyn AlertSink>) -> Self {
        Self {
            sink,
            sound_enabled: AtomicBool::new(false),
        }
    }

    /// Records the user gesture that allows audible alerts.
    pub fn enable_sound(&self) {
        if !self.sound_enabled.swap(true, Ordering::AcqRel) {
            debug!("foreground push alerts enabled");
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled.load(Ordering::Acquire)
    }

    /// Surfaces one payload.
    pub fn deliver(&self, payload: &PushPayload, focus: Focus) -> Delivery {
        let title = payload
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE);
        let body = payload.body.as_deref().unwrap_or_default();

        if focus == Focus::Background {
            self.sink.os_notification(title, body);
            return Delivery::Background;
        }

        if !self.sound_enabled() {
            debug!(title, "foreground push ignored until sound is enabled");
            return Delivery::Suppressed;
        }

        self.sink.toast(title);
        if self.sink.permission() != NotificationPermission::Granted {
            return Delivery::Toast;
        }

        self.sink.os_notification(title, body);
        if let Err(e) = self.sink.play_alert_sound() {
            warn!(error = %e, "alert sound playback failed");
        }
        Delivery::ToastAndAlert
    }
}
