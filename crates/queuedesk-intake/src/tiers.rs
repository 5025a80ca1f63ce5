// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use queuedesk_api::ApiClient;
use queuedesk_core::{QueueDeskError, QueueType, QueueTypeId, Tier};
use tracing::warn;

pub const LOAD_TIERS_FAILED: &str = "Failed to load tiers. Please try again later.";

/// A selectable tier backed by a queue type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierOption {
    pub tier: Tier,
    pub queue_type_id: QueueTypeId,
    pub name: String,
    pub description: String,
}

impl TierOption {
    pub fn amount_band(&self) -> &'static str {
        self.tier.amount_band()
    }
}

impl From<QueueType> for TierOption {
    fn from(queue_type: QueueType) -> Self {
        Self {
            tier: Tier::from_queue_name(&queue_type.name),
            queue_type_id: queue_type.id,
            name: queue_type.name,
            description: queue_type.description,
        }
    }
}

/// Lists the backend's queue types as tier options, lowest tier first.
pub async fn load_tiers(api: &ApiClient) -> Result<Vec<TierOption>, QueueDeskError> {
    let queue_types = api.queue_types().await.map_err(|e| {
        warn!(error = %e, "failed to load tiers");
        e.with_message(LOAD_TIERS_FAILED)
    })?;
    let mut options: Vec<TierOption> = queue_types.into_iter().map(TierOption::from).collect();
    options.sort_by_key(|o| o.tier);
    Ok(options)
}
