// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Active-branch resolution.
//!
//! Branch QR codes open the client with a `data` query parameter holding
//! JSON like:
//!
//! ```json
//! { "metadata": { "branchId": "…", "branchName": "…", "location": "…" },
//!   "navigationUrl": "/queue" }
//! ```
//!
//! The JSON may be percent-encoded or base64-encoded. Applying a link stores
//! the branch id; every later screen resolves the active branch from that
//! stored id, falling back to the configured default.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use queuedesk_api::ApiClient;
use queuedesk_core::traits::BRANCH_ID_KEY;
use queuedesk_core::{BranchId, Counter, QueueDeskError, StateStore};
use serde::Deserialize;
use tracing::{info, warn};

const DATA_PARAM: &str = "data";

/// Decoded branch link payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchLink {
    pub metadata: BranchMetadata,
    #[serde(default)]
    pub navigation_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchMetadata {
    #[serde(default)]
    pub branch_id: Option<BranchId>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Parses a branch link.
///
/// Accepts a full URL with a `data` parameter, a bare query string
/// (`?data=…` or `data=…`), or the parameter value on its own.
pub fn parse_link(link: &str) -> Result<BranchLink, QueueDeskError> {
    let link = link.trim();
    let value = data_param(link).unwrap_or_else(|| link.to_string());
    decode_payload(&value)
}

fn data_param(link: &str) -> Option<String> {
    let query = match url::Url::parse(link) {
        Ok(url) => url.query()?.to_string(),
        Err(_) => {
            let query = link.split_once('?').map_or(link, |(_, q)| q);
            if !query.contains(&format!("{DATA_PARAM}=")) {
                return None;
            }
            query.to_string()
        }
    };
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == DATA_PARAM)
        .map(|(_, value)| value.into_owned())
}

fn decode_payload(value: &str) -> Result<BranchLink, QueueDeskError> {
    if let Ok(link) = serde_json::from_str(value) {
        return Ok(link);
    }

    // Values pasted straight from a URL may still be percent-encoded.
    let unescaped: String = url::form_urlencoded::parse(format!("v={value}").as_bytes())
        .map(|(_, v)| v.into_owned())
        .next()
        .unwrap_or_default();
    if let Ok(link) = serde_json::from_str(&unescaped) {
        return Ok(link);
    }

    for engine in [&STANDARD, &URL_SAFE, &URL_SAFE_NO_PAD] {
        if let Ok(bytes) = engine.decode(value.trim())
            && let Ok(link) = serde_json::from_slice(&bytes)
        {
            return Ok(link);
        }
    }

    Err(QueueDeskError::InvalidInput(
        "branch link does not carry a readable data payload".into(),
    ))
}

/// Resolves and persists the active branch.
#[derive(Clone)]
pub struct BranchContext {
    state: Arc<dyn StateStore>,
    default_branch: BranchId,
}

impl BranchContext {
    pub fn new(state: Arc<dyn StateStore>, default_branch: BranchId) -> Self {
        Self {
            state,
            default_branch,
        }
    }

    /// Applies a branch link.
    ///
    /// Stores the branch id when present and returns the decoded link so the
    /// caller can follow its navigation target. Unreadable links are logged
    /// and ignored.
    pub async fn apply_link(&self, link: &str) -> Result<Option<BranchLink>, QueueDeskError> {
        let parsed = match parse_link(link) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "ignoring branch link");
                return Ok(None);
            }
        };

        if let Some(branch_id) = parsed
            .metadata
            .branch_id
            .as_ref()
            .filter(|id| !id.as_str().is_empty())
        {
            self.state.set(BRANCH_ID_KEY, branch_id.as_str()).await?;
            info!(
                branch_id = %branch_id,
                branch_name = parsed.metadata.branch_name.as_deref().unwrap_or(""),
                "active branch stored"
            );
        }
        Ok(Some(parsed))
    }

    /// The stored branch id, or the configured default.
    pub async fn active_branch(&self) -> Result<BranchId, QueueDeskError> {
        Ok(self
            .state
            .get(BRANCH_ID_KEY)
            .await?
            .filter(|id| !id.is_empty())
            .map(BranchId::from)
            .unwrap_or_else(|| self.default_branch.clone()))
    }

    /// Counters of the active branch, ordered by counter number.
    pub async fn counter_catalogue(&self, api: &ApiClient) -> Result<Vec<Counter>, QueueDeskError> {
        let branch = self.active_branch().await?;
        let mut counters = api.counters_by_branch(&branch).await?;
        counters.sort_by_key(|c| c.number);
        Ok(counters)
    }
}
