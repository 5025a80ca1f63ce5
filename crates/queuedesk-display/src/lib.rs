// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public display for the Queuedesk client.
//!
//! Read-only: [`DisplayPoller`] periodically fetches the branch's counters,
//! what each is serving and the next pending numbers, and publishes a
//! [`Board`] snapshot. Nothing here writes to the backend.

pub mod board;
pub mod poller;

pub use board::{Board, BoardRow, DisplayScope, fetch_board, next_numbers};
pub use poller::{DisplayPoller, DisplayState};
