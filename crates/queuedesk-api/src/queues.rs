// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queue types and the queue-entry lifecycle.

use queuedesk_core::{BranchId, CounterId, QueueDeskError, QueueEntry, QueueId, QueueType};
use tracing::info;

use crate::client::ApiClient;
use crate::types::{CreateQueueRequest, QueueTicket, QueueUpdateRequest};

impl ApiClient {
    /// `GET /queue-types/get-all`.
    pub async fn queue_types(&self) -> Result<Vec<QueueType>, QueueDeskError> {
        let url = self.endpoint(&["queue-types", "get-all"])?;
        self.send_json(self.get(url)).await
    }

    /// `POST /queues/create`.
    pub async fn create_queue(
        &self,
        request: &CreateQueueRequest,
    ) -> Result<QueueTicket, QueueDeskError> {
        let url = self.endpoint(&["queues", "create"])?;
        let ticket: QueueTicket = self.send_json(self.post(url).json(request)).await?;
        info!(
            queue_id = %ticket.id,
            queue_number = %ticket.number,
            customer_id = %request.customer_id,
            "queue entry created"
        );
        Ok(ticket)
    }

    /// `PUT /queues/update/{queueId}`.
    pub async fn update_queue(
        &self,
        queue_id: &QueueId,
        request: &QueueUpdateRequest,
    ) -> Result<(), QueueDeskError> {
        let url = self.endpoint(&["queues", "update", queue_id.as_str()])?;
        self.send_empty(self.put(url).json(request)).await?;
        info!(queue_id = %queue_id, status = %request.status, "queue entry updated");
        Ok(())
    }

    /// `GET /queues/branch/{branchId}`.
    pub async fn queues_by_branch(
        &self,
        branch_id: &BranchId,
    ) -> Result<Vec<QueueEntry>, QueueDeskError> {
        let url = self.endpoint(&["queues", "branch", branch_id.as_str()])?;
        self.send_json(self.get(url)).await
    }

    /// `GET /queues/now-serving/counter/{counterId}`.
    ///
    /// The backend answers with a bare queue number, either as a JSON string
    /// or as plain text. An empty answer means nothing is being served.
    pub async fn now_serving(&self, counter_id: &CounterId) -> Result<Option<String>, QueueDeskError> {
        let url = self.endpoint(&["queues", "now-serving", "counter", counter_id.as_str()])?;
        let response = self.send(self.get(url)).await?;
        let body = response.text().await.map_err(|e| QueueDeskError::Transport {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        let number = match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(serde_json::Value::String(s)) => s,
            Ok(serde_json::Value::Null) => String::new(),
            _ => body.trim().to_string(),
        };
        Ok(Some(number).filter(|n| !n.is_empty()))
    }
}
