// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Staff counter console for the Queuedesk client.

pub mod console;
pub mod listing;

pub use console::CounterConsole;
pub use listing::{ListingQuery, Page, list};
