// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Queuedesk branch queue client.
//!
//! This crate provides the error type, the domain types shared with the
//! backend, queue-number helpers, and the adapter traits implemented by the
//! platform-facing crates.

pub mod error;
pub mod notice;
pub mod queue_number;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::QueueDeskError;
pub use notice::{NoticeSlot, TransientNotice};
pub use queue_number::{by_sequence, format_queue_number, trailing_sequence};
pub use traits::{AlertSink, PushTokenSource, StateStore};
pub use types::{
    Branch, BranchId, Counter, CounterId, CustomerId, CustomerRecord, CustomerType,
    DocumentKind, NotificationPermission, PushPayload, QueueEntry, QueueId, QueueStatus,
    QueueType, QueueTypeId, ResidentStatus, StaffSession, Tier,
};
