// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock push adapters.
//!
//! `RecordingAlertSink` captures every toast, notification and sound request
//! for assertion; [`RecordingAlertSink::failing_sound`] makes playback fail. `FixedTokenSource` hands out a preset device token, or
//! fails when built with [`FixedTokenSource::failing`].

use std::sync::Mutex;

use async_trait::async_trait;
use queuedesk_core::{AlertSink, NotificationPermission, PushTokenSource, QueueDeskError};

/// One thing the sink was asked to show or play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Toast(String),
    Notification { title: String, body: String },
    Sound,
}

pub struct RecordingAlertSink {
    permission: NotificationPermission,
    fail_sound: bool,
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingAlertSink {
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            permission,
            fail_sound: false,
            alerts: Mutex::new(Vec::new()),
        }
    }

    /// Records sound requests but reports playback as refused.
    pub fn failing_sound(mut self) -> Self {
        self.fail_sound = true;
        self
    }

    /// Everything recorded so far.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }

    fn record(&self, alert: Alert) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(alert);
        }
    }
}

impl AlertSink for RecordingAlertSink {
    fn permission(&self) -> NotificationPermission {
        self.permission
    }

    fn toast(&self, title: &str) {
        self.record(Alert::Toast(title.to_string()));
    }

    fn os_notification(&self, title: &str, body: &str) {
        self.record(Alert::Notification {
            title: title.to_string(),
            body: body.to_string(),
        });
    }

    fn play_alert_sound(&self) -> Result<(), QueueDeskError> {
        self.record(Alert::Sound);
        if self.fail_sound {
            return Err(QueueDeskError::Internal("alert sound refused".into()));
        }
        Ok(())
    }
}

pub struct FixedTokenSource {
    token: Result<Option<String>, String>,
}

impl FixedTokenSource {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: Ok(token.map(str::to_string)),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            token: Err(reason.to_string()),
        }
    }
}

#[async_trait]
impl PushTokenSource for FixedTokenSource {
    async fn device_token(&self) -> Result<Option<String>, QueueDeskError> {
        self.token.clone().map_err(QueueDeskError::Internal)
    }
}
