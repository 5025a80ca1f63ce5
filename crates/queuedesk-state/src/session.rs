// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Staff session lifecycle.
//!
//! The session is persisted under the `staff` key and read back on every
//! [`SessionStore::current`] call, so a 401 teardown performed by the API
//! client is visible immediately.

use std::sync::Arc;

use queuedesk_api::{ApiClient, SignInRequest};
use queuedesk_core::traits::STAFF_SESSION_KEY;
use queuedesk_core::{CounterId, QueueDeskError, StaffSession, StateStore};
use secrecy::SecretString;
use tracing::{info, warn};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const WRONG_COUNTER: &str = "User is not assigned to this counter";
pub const SIGN_IN_FAILED: &str = "An error occurred during sign in";
pub const NETWORK_ERROR: &str = "Network error occurred";

/// Holds the authenticated staff identity.
#[derive(Clone)]
pub struct SessionStore {
    api: ApiClient,
    state: Arc<dyn StateStore>,
}

impl SessionStore {
    pub fn new(api: ApiClient, state: Arc<dyn StateStore>) -> Self {
        Self { api, state }
    }

    /// Signs in to a counter, persists the session and installs its token.
    ///
    /// Failures are [`QueueDeskError::Authentication`] carrying the message
    /// shown to staff; no session is created.
    pub async fn sign_in(
        &self,
        email: &str,
        password: SecretString,
        counter_id: &CounterId,
    ) -> Result<StaffSession, QueueDeskError> {
        let request = SignInRequest {
            email: email.to_string(),
            password,
        };
        let response = self
            .api
            .sign_in(counter_id, &request)
            .await
            .map_err(sign_in_failure)?;

        let session = StaffSession {
            id: email.to_string(),
            name: response.staff_name,
            counter: Some(counter_id.clone()),
            token: response.token,
        };
        let encoded = serde_json::to_string(&session)
            .map_err(|e| QueueDeskError::Internal(format!("failed to encode staff session: {e}")))?;
        self.state.set(STAFF_SESSION_KEY, &encoded).await?;
        self.api.set_token(Some(session.token.clone()));
        Ok(session)
    }

    /// The persisted session, if any. Unreadable entries count as signed out.
    pub async fn current(&self) -> Result<Option<StaffSession>, QueueDeskError> {
        let Some(raw) = self.state.get(STAFF_SESSION_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable staff session");
                Ok(None)
            }
        }
    }

    /// Installs the persisted session's token at start-up.
    pub async fn restore(&self) -> Result<Option<StaffSession>, QueueDeskError> {
        let session = self.current().await?;
        if let Some(session) = &session {
            self.api.set_token(Some(session.token.clone()));
            info!(staff = %session.id, "staff session restored");
        }
        Ok(session)
    }

    /// Removes the session and the installed token.
    pub async fn sign_out(&self) -> Result<(), QueueDeskError> {
        self.state.remove(STAFF_SESSION_KEY).await?;
        self.api.set_token(None);
        info!("staff signed out");
        Ok(())
    }

    /// Clears every persisted key and the token.
    pub async fn reset(&self) -> Result<(), QueueDeskError> {
        self.state.clear().await?;
        self.api.set_token(None);
        Ok(())
    }
}

fn sign_in_failure(err: QueueDeskError) -> QueueDeskError {
    warn!(error = %err, "sign in failed");
    let message = match &err {
        QueueDeskError::Unauthorized => INVALID_CREDENTIALS,
        QueueDeskError::Api { status: 403, .. } => WRONG_COUNTER,
        QueueDeskError::Transport { .. } => NETWORK_ERROR,
        _ => SIGN_IN_FAILED,
    };
    QueueDeskError::Authentication(message.to_string())
}
