// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP plumbing shared by every endpoint wrapper.
//!
//! Provides [`ApiClient`], which joins endpoint paths onto the configured base
//! URL, attaches the bearer token once one is installed, and maps responses
//! into [`QueueDeskError`]. A 401 from any endpoint clears the token and the
//! persisted staff session before the error is returned.

use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use queuedesk_config::model::BackendConfig;
use queuedesk_core::QueueDeskError;
use queuedesk_core::traits::{STAFF_SESSION_KEY, StateStore};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Client for the queue backend.
///
/// Cloning is cheap and clones share the installed token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
    session_state: Option<Arc<dyn StateStore>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_token", &self.has_token())
            .finish()
    }
}

impl ApiClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// `timeout` of `None` leaves the transport default in place.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, QueueDeskError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| QueueDeskError::Config(format!("invalid backend base URL `{base_url}`: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(QueueDeskError::Config(format!(
                "backend base URL `{base_url}` cannot carry endpoint paths"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| QueueDeskError::Transport {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
            session_state: None,
        })
    }

    /// Creates a client from the `[backend]` config section.
    pub fn from_config(config: &BackendConfig) -> Result<Self, QueueDeskError> {
        Self::new(&config.base_url, config.timeout_secs.map(Duration::from_secs))
    }

    /// Attaches the store whose staff session is removed on a 401.
    pub fn with_session_state(mut self, state: Arc<dyn StateStore>) -> Self {
        self.session_state = Some(state);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Installs (or with `None`, removes) the bearer token sent on every call.
    pub fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    pub fn has_token(&self) -> bool {
        self.current_token().is_some()
    }

    fn current_token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Builds the URL for an endpoint from path segments. Segments are
    /// percent-encoded, so ids containing `/` stay a single segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, QueueDeskError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| QueueDeskError::Config("backend base URL cannot carry paths".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        self.http.get(url)
    }

    pub(crate) fn post(&self, url: Url) -> RequestBuilder {
        self.http.post(url)
    }

    pub(crate) fn put(&self, url: Url) -> RequestBuilder {
        self.http.put(url)
    }

    /// Sends a request and returns the successful response.
    ///
    /// Non-success statuses become [`QueueDeskError::Api`], except 401 which
    /// tears down the session and becomes [`QueueDeskError::Unauthorized`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, QueueDeskError> {
        let request = match self.current_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| QueueDeskError::Transport {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        debug!(status = %status, url = %response.url(), "backend response received");

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.tear_down_session().await;
            return Err(QueueDeskError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        Err(QueueDeskError::Api {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }

    /// Sends a request and decodes its JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, QueueDeskError> {
        let response = self.send(request).await?;
        let body = response.text().await.map_err(|e| QueueDeskError::Transport {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body)
            .map_err(|e| QueueDeskError::Internal(format!("failed to parse backend response: {e}")))
    }

    /// Sends a request and discards the body.
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<(), QueueDeskError> {
        self.send(request).await.map(drop)
    }

    async fn tear_down_session(&self) {
        self.set_token(None);
        if let Some(state) = &self.session_state
            && let Err(e) = state.remove(STAFF_SESSION_KEY).await
        {
            warn!(error = %e, "failed to remove staff session after 401");
        }
        warn!("backend rejected credentials; staff session cleared");
    }
}

/// Pulls a `message` field out of JSON error bodies, else uses the raw body.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string));
    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => status.to_string(),
        None => body.trim().to_string(),
    }
}
