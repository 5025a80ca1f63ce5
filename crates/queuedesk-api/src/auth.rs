// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Staff authentication.

use queuedesk_core::{CounterId, QueueDeskError};
use tracing::info;

use crate::client::ApiClient;
use crate::types::{SignInRequest, SignInResponse};

impl ApiClient {
    /// `POST /auth/signIn/{counterId}`.
    ///
    /// Does not install the returned token; the session store does that once
    /// the session is persisted.
    pub async fn sign_in(
        &self,
        counter_id: &CounterId,
        credentials: &SignInRequest,
    ) -> Result<SignInResponse, QueueDeskError> {
        let url = self.endpoint(&["auth", "signIn", counter_id.as_str()])?;
        let response: SignInResponse = self.send_json(self.post(url).json(credentials)).await?;
        info!(counter_id = %counter_id, email = %credentials.email, "staff signed in");
        Ok(response)
    }
}
