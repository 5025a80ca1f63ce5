// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared wiring for every command.

use std::path::Path;
use std::sync::Arc;

use queuedesk_api::ApiClient;
use queuedesk_config::QueueDeskConfig;
use queuedesk_core::{QueueDeskError, StateStore};
use queuedesk_state::{BranchContext, Database, MemoryStateStore, SessionStore, SqliteStateStore};
use tracing::debug;

pub struct App {
    pub config: QueueDeskConfig,
    pub api: ApiClient,
    pub sessions: SessionStore,
    pub branches: BranchContext,
}

impl App {
    /// Opens client state and the backend client, and reinstalls any
    /// persisted staff token.
    pub async fn open(config: QueueDeskConfig, ephemeral: bool) -> Result<Self, QueueDeskError> {
        let state: Arc<dyn StateStore> = if ephemeral {
            debug!("using in-memory client state");
            Arc::new(MemoryStateStore::new())
        } else {
            let db = Database::open(Path::new(&config.state.database_path)).await?;
            Arc::new(SqliteStateStore::new(db))
        };

        let api = ApiClient::from_config(&config.backend)?.with_session_state(state.clone());
        let sessions = SessionStore::new(api.clone(), state.clone());
        sessions.restore().await?;
        let branches = BranchContext::new(
            state,
            config.branch.default_branch_id.as_str().into(),
        );

        Ok(Self {
            config,
            api,
            sessions,
            branches,
        })
    }
}
