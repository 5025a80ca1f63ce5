// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the edges of the client.
//!
//! Platform services (persistent key/value state, push tokens, on-screen
//! alerts) sit behind these traits so the orchestration crates stay testable
//! with in-memory implementations.

pub mod push;
pub mod state;

pub use push::{AlertSink, PushTokenSource};
pub use state::{BRANCH_ID_KEY, STAFF_SESSION_KEY, StateStore};
