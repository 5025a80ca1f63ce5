// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort device-token registration.

use std::sync::Arc;

use queuedesk_api::ApiClient;
use queuedesk_core::{CustomerId, PushTokenSource};
use tracing::{debug, info, warn};

/// Registers the device token for a customer.
#[derive(Clone)]
pub struct PushRegistrar {
    api: ApiClient,
    source: Arc<dyn PushTokenSource>,
    enabled: bool,
}

impl PushRegistrar {
    pub fn new(api: ApiClient, source: Arc<dyn PushTokenSource>, enabled: bool) -> Self {
        Self {
            api,
            source,
            enabled,
        }
    }

    /// Sends the device token to the backend for `customer_id`.
    ///
    /// Returns whether a token was registered. A missing token, a token
    /// source error or a backend error is logged and swallowed.
    pub async fn register(&self, customer_id: &CustomerId) -> bool {
        if !self.enabled {
            debug!("push registration disabled");
            return false;
        }

        let token = match self.source.device_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                warn!(customer_id = %customer_id, "no push token available");
                return false;
            }
            Err(e) => {
                warn!(customer_id = %customer_id, error = %e, "failed to obtain push token");
                return false;
            }
        };

        match self.api.register_push_token(customer_id, &token).await {
            Ok(()) => {
                info!(customer_id = %customer_id, "push token registered");
                true
            }
            Err(e) => {
                warn!(customer_id = %customer_id, error = %e, "push token registration failed");
                false
            }
        }
    }
}
