// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent client-side key/value state.

use async_trait::async_trait;

use crate::error::QueueDeskError;

/// Key holding the signed-in staff session (JSON).
pub const STAFF_SESSION_KEY: &str = "staff";

/// Key holding the active branch id.
pub const BRANCH_ID_KEY: &str = "branchId";

/// String key/value store that survives restarts.
///
/// Values are stored as given; nothing is encrypted.
#[async_trait]
pub trait StateStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, QueueDeskError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), QueueDeskError>;

    /// Removes a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), QueueDeskError>;

    /// Removes every key.
    async fn clear(&self) -> Result<(), QueueDeskError>;
}
