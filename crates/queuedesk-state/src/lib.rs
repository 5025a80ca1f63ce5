// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side persisted state for Queuedesk.
//!
//! Provides the SQLite-backed [`StateStore`](queuedesk_core::StateStore)
//! with embedded migrations, an in-memory store, the staff [`SessionStore`],
//! and active-branch resolution from branch links.

pub mod branch;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod session;
pub mod store;

pub use branch::{BranchContext, BranchLink, parse_link};
pub use database::Database;
pub use memory::MemoryStateStore;
pub use session::SessionStore;
pub use store::SqliteStateStore;
