// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Device token taken from configuration.

use async_trait::async_trait;
use queuedesk_config::model::PushConfig;
use queuedesk_core::{PushTokenSource, QueueDeskError};

/// Token source for hosts without a push SDK: the token is provisioned in
/// `[push] device_token`.
#[derive(Clone, Default)]
pub struct ConfiguredTokenSource {
    token: Option<String>,
}

impl ConfiguredTokenSource {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn from_config(config: &PushConfig) -> Self {
        Self::new(config.device_token.clone())
    }
}

impl std::fmt::Debug for ConfiguredTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredTokenSource")
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[async_trait]
impl PushTokenSource for ConfiguredTokenSource {
    async fn device_token(&self) -> Result<Option<String>, QueueDeskError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_token_counts_as_none() {
        assert_eq!(
            ConfiguredTokenSource::new(Some("  ".into()))
                .device_token()
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            ConfiguredTokenSource::new(Some("fcm-1".into()))
                .device_token()
                .await
                .unwrap()
                .as_deref(),
            Some("fcm-1")
        );
    }

    #[test]
    fn debug_hides_token() {
        let source = ConfiguredTokenSource::new(Some("fcm-secret".into()));
        assert!(!format!("{source:?}").contains("fcm-secret"));
    }
}
