// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Push Notification Bridge.
//!
//! Two independent halves:
//!
//! - [`PushRegistrar`] hands the device token to the backend so it can push
//!   queue updates to a customer. Registration is best-effort: failures are
//!   logged and never reach the caller.
//! - [`PushBridge`] decides how an incoming payload is surfaced, depending on
//!   focus, the one-time sound gesture and OS notification permission.

pub mod bridge;
pub mod registration;
pub mod source;

pub use bridge::{Delivery, Focus, PushBridge};
pub use registration::PushRegistrar;
pub use source::ConfiguredTokenSource;
