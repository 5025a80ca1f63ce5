// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock backend harness.
//!
//! `TestBackend` starts a wiremock server and wires an `ApiClient` and a
//! state store to it, so orchestration code runs unchanged against canned
//! responses.

use std::sync::Arc;

use queuedesk_api::ApiClient;
use queuedesk_core::traits::STAFF_SESSION_KEY;
use queuedesk_core::{QueueDeskError, StaffSession, StateStore};
use queuedesk_state::{Database, MemoryStateStore, SqliteStateStore};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builder for [`TestBackend`].
pub struct TestBackendBuilder {
    sqlite: bool,
}

impl TestBackendBuilder {
    fn new() -> Self {
        Self { sqlite: false }
    }

    /// Persist client state in a temporary SQLite file instead of memory.
    pub fn with_sqlite_state(mut self) -> Self {
        self.sqlite = true;
        self
    }

    pub async fn build(self) -> Result<TestBackend, QueueDeskError> {
        let server = MockServer::start().await;

        let temp_dir =
            tempfile::TempDir::new().map_err(|e| QueueDeskError::Storage { source: e.into() })?;
        let state: Arc<dyn StateStore> = if self.sqlite {
            let db = Database::open(&temp_dir.path().join("state.db")).await?;
            Arc::new(SqliteStateStore::new(db))
        } else {
            Arc::new(MemoryStateStore::new())
        };

        let api = ApiClient::new(&format!("{}/", server.uri()), None)?
            .with_session_state(state.clone());

        Ok(TestBackend {
            server,
            api,
            state,
            _temp_dir: temp_dir,
        })
    }
}

/// A mock backend with a client pointed at it.
pub struct TestBackend {
    /// The wiremock server standing in for the queue backend.
    pub server: MockServer,
    /// Client using `server` as its base URL.
    pub api: ApiClient,
    /// State store attached to `api` for 401 teardown.
    pub state: Arc<dyn StateStore>,
    _temp_dir: tempfile::TempDir,
}

impl TestBackend {
    pub fn builder() -> TestBackendBuilder {
        TestBackendBuilder::new()
    }

    /// In-memory state, no extra configuration.
    pub async fn start() -> TestBackend {
        match Self::builder().build().await {
            Ok(backend) => backend,
            Err(e) => panic!("failed to start test backend: {e}"),
        }
    }

    /// Responds to `verb route` with `status` and a JSON body.
    pub async fn respond(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Responds to `verb route` with an empty body.
    pub async fn respond_empty(&self, verb: &str, route: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Requests received for `verb route`.
    pub async fn hits(&self, verb: &str, route: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == verb && r.url.path() == route)
            .collect()
    }

    /// Stores a staff session and installs its token, as a sign-in would.
    pub async fn sign_in_as(&self, session: &StaffSession) -> Result<(), QueueDeskError> {
        let encoded = serde_json::to_string(session)
            .map_err(|e| QueueDeskError::Internal(e.to_string()))?;
        self.state.set(STAFF_SESSION_KEY, &encoded).await?;
        self.api.set_token(Some(session.token.clone()));
        Ok(())
    }
}

/// A staff session assigned to `counter`.
pub fn staff_session(counter: &str) -> StaffSession {
    StaffSession {
        id: "staff@branch.example".into(),
        name: Some("Nur".into()),
        counter: Some(counter.into()),
        token: "tok-test".into(),
    }
}
