// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering of push notifications.

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use colored::Colorize;
use queuedesk_core::{AlertSink, NotificationPermission, PushPayload, QueueDeskError};
use queuedesk_push::{Delivery, Focus, PushBridge};

/// Toasts go to stdout, OS-level notifications to stderr and the alert
/// sound is the terminal bell.
pub struct TerminalAlertSink;

impl AlertSink for TerminalAlertSink {
    fn permission(&self) -> NotificationPermission {
        if std::io::stderr().is_terminal() {
            NotificationPermission::Granted
        } else {
            NotificationPermission::Denied
        }
    }

    fn toast(&self, title: &str) {
        println!("{} {}", "●".blue(), title.bold());
    }

    fn os_notification(&self, title: &str, body: &str) {
        eprintln!("[{}] {body}", title.bold());
    }

    fn play_alert_sound(&self) -> Result<(), QueueDeskError> {
        let mut stderr = std::io::stderr();
        stderr
            .write_all(b"\x07")
            .and_then(|()| stderr.flush())
            .map_err(|e| QueueDeskError::Internal(format!("failed to ring terminal bell: {e}")))
    }
}

pub fn run_alert(title: Option<String>, body: Option<String>, background: bool, sound: bool) {
    let bridge = PushBridge::new(Arc::new(TerminalAlertSink));
    if sound {
        bridge.enable_sound();
    }
    let focus = if background {
        Focus::Background
    } else {
        Focus::Foreground
    };

    let delivery = bridge.deliver(&PushPayload { title, body }, focus);
    if delivery == Delivery::Suppressed {
        println!(
            "{}",
            "Notification ignored: sound has not been enabled (pass --sound).".dimmed()
        );
    }
}
