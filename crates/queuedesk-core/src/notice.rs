// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auto-dismissing inline messages.
//!
//! Guard refusals and short confirmations are shown for a fixed time and then
//! disappear on their own. Expiry is evaluated lazily on read, using tokio's
//! clock so paused-time tests can advance it.

use std::time::Duration;

use tokio::time::Instant;

/// A message that is visible until its deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientNotice {
    message: String,
    expires_at: Instant,
}

impl TransientNotice {
    pub fn new(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Holds at most one notice; a newer notice replaces the older one.
#[derive(Debug, Clone)]
pub struct NoticeSlot {
    ttl: Duration,
    current: Option<TransientNotice>,
}

impl NoticeSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    /// Shows a message for the slot's fixed duration.
    pub fn show(&mut self, message: impl Into<String>) {
        self.current = Some(TransientNotice::new(message, self.ttl));
    }

    /// The visible message, if any. Expired notices are dropped.
    pub fn current(&mut self) -> Option<&str> {
        if self.current.as_ref().is_some_and(|n| !n.is_visible()) {
            self.current = None;
        }
        self.current.as_ref().map(TransientNotice::message)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn notice_expires_after_ttl() {
        let mut slot = NoticeSlot::new(Duration::from_secs(3));
        slot.show("counter busy");
        assert_eq!(slot.current(), Some("counter busy"));

        tokio::time::advance(Duration::from_millis(2_999)).await;
        assert_eq!(slot.current(), Some("counter busy"));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(slot.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_notice_restarts_the_clock() {
        let mut slot = NoticeSlot::new(Duration::from_secs(3));
        slot.show("first");
        tokio::time::advance(Duration::from_secs(2)).await;
        slot.show("second");
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(slot.current(), Some("second"));
        slot.clear();
        assert_eq!(slot.current(), None);
    }
}
