// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of [`StateStore`].

use async_trait::async_trait;
use queuedesk_core::{QueueDeskError, StateStore};
use rusqlite::OptionalExtension;
use tracing::debug;

use crate::database::{Database, map_tr_err};

/// Key/value state kept in the `client_state` table.
#[derive(Clone)]
pub struct SqliteStateStore {
    db: Database,
}

impl SqliteStateStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StateStore for SqliteStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>, QueueDeskError> {
        let key = key.to_string();
        self.db
            .connection()
            .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
                conn.query_row(
                    "SELECT value FROM client_state WHERE key = ?1",
                    rusqlite::params![key],
                    |row| row.get(0),
                )
                .optional()
            })
            .await
            .map_err(map_tr_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), QueueDeskError> {
        let key = key.to_string();
        let value = value.to_string();
        debug!(key = %key, "persisting client state");
        self.db
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO client_state (key, value) VALUES (?1, ?2) \
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, \
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                    rusqlite::params![key, value],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn remove(&self, key: &str) -> Result<(), QueueDeskError> {
        let key = key.to_string();
        self.db
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute("DELETE FROM client_state WHERE key = ?1", rusqlite::params![key])?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn clear(&self) -> Result<(), QueueDeskError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute("DELETE FROM client_state", [])?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteStateStore {
        SqliteStateStore::new(Database::open_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn set_get_overwrite_remove() {
        let store = store().await;
        assert_eq!(store.get("branchId").await.unwrap(), None);

        store.set("branchId", "b-1").await.unwrap();
        store.set("branchId", "b-2").await.unwrap();
        assert_eq!(store.get("branchId").await.unwrap().as_deref(), Some("b-2"));

        store.remove("branchId").await.unwrap();
        store.remove("branchId").await.unwrap();
        assert_eq!(store.get("branchId").await.unwrap(), None);
    }

    #[tokio::test]
    async fn clear_removes_every_key() {
        let store = store().await;
        store.set("staff", "{}").await.unwrap();
        store.set("branchId", "b-1").await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.get("staff").await.unwrap(), None);
        assert_eq!(store.get("branchId").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.db");

        let first = SqliteStateStore::new(Database::open(&path).await.unwrap());
        first.set("branchId", "b-9").await.unwrap();
        drop(first);

        let second = SqliteStateStore::new(Database::open(&path).await.unwrap());
        assert_eq!(second.get("branchId").await.unwrap().as_deref(), Some("b-9"));
    }
}
