// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The result step: issued number, position, wait countdown and the
//! optional summary email.

use std::time::Duration;

use queuedesk_api::{ApiClient, QueueEmailRequest};
use queuedesk_config::model::IntakeConfig;
use queuedesk_core::{NoticeSlot, QueueDeskError, format_queue_number, trailing_sequence};
use tokio::time::Instant;
use tracing::warn;

use crate::store::QueueResult;

pub const EMAIL_SENT: &str = "Queue details sent to your email!";
pub const EMAIL_FAILED: &str = "Failed to send email. Please try again.";
pub const ALMOST_UP: &str = "You're almost up! Please return to the counter area.";

const EMAIL_NOTICE_TTL: Duration = Duration::from_secs(3);
const MINUTE: Duration = Duration::from_secs(60);

pub struct ResultScreen {
    number: String,
    customer_name: String,
    position: i64,
    almost_up_position: u64,
    wait_minutes: u64,
    shown_at: Instant,
    notice: NoticeSlot,
    email_error: Option<String>,
}

impl ResultScreen {
    pub fn new(
        result: &QueueResult,
        customer_name: &str,
        current_serving: &str,
        almost_up_position: u64,
    ) -> Self {
        let position = sequence_gap(
            trailing_sequence(&result.number),
            trailing_sequence(current_serving),
        );
        Self {
            number: result.number.clone(),
            customer_name: customer_name.to_string(),
            position,
            almost_up_position,
            wait_minutes: leading_number(&result.wait_estimate),
            shown_at: Instant::now(),
            notice: NoticeSlot::new(EMAIL_NOTICE_TTL),
            email_error: None,
        }
    }

    pub fn from_config(result: &QueueResult, customer_name: &str, config: &IntakeConfig) -> Self {
        Self::new(
            result,
            customer_name,
            &config.current_serving,
            config.almost_up_position,
        )
    }

    /// Queue number as displayed, e.g. `0007`.
    pub fn display_number(&self) -> String {
        format_queue_number(Some(&self.number))
    }

    /// Entries ahead of this one.
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Estimated minutes left, counting down once a minute to zero.
    pub fn remaining_minutes(&self) -> u64 {
        let elapsed = self.shown_at.elapsed().as_secs() / MINUTE.as_secs();
        self.wait_minutes.saturating_sub(elapsed)
    }

    pub fn is_almost_up(&self) -> bool {
        self.position <= i64::try_from(self.almost_up_position).unwrap_or(i64::MAX)
    }

    pub fn reminder(&self) -> String {
        if self.is_almost_up() {
            ALMOST_UP.to_string()
        } else {
            format!(
                "Please return when you're {} away to avoid missing your turn.",
                self.almost_up_position
            )
        }
    }

    /// Sends the queue summary to `email`.
    pub async fn send_email(&mut self, api: &ApiClient, email: &str) -> Result<(), QueueDeskError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(QueueDeskError::InvalidInput("email address is required".into()));
        }
        self.email_error = None;
        self.notice.clear();

        let request = QueueEmailRequest {
            email: email.to_string(),
            queue_number: self.number.clone(),
            customer_name: self.customer_name.clone(),
            estimated_wait_time: self.remaining_minutes(),
        };
        match api.send_queue_email(&request).await {
            Ok(()) => {
                self.notice.show(EMAIL_SENT);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "queue email failed");
                self.email_error = Some(EMAIL_FAILED.to_string());
                Err(e.with_message(EMAIL_FAILED))
            }
        }
    }

    /// The email confirmation while it is visible.
    pub fn notice(&mut self) -> Option<&str> {
        self.notice.current()
    }

    pub fn email_error(&self) -> Option<&str> {
        self.email_error.as_deref()
    }
}

/// `issued - serving`, saturating at the `i64` bounds.
fn sequence_gap(issued: u64, serving: u64) -> i64 {
    if issued >= serving {
        i64::try_from(issued - serving).unwrap_or(i64::MAX)
    } else {
        i64::try_from(serving - issued).map_or(i64::MIN, |gap| -gap)
    }
}

/// Reads the leading digits of a wait estimate (`"25"`, `"25 min"`).
fn leading_number(text: &str) -> u64 {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
