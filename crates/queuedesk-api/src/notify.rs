// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound notifications: queue summary email and the next-fifth signal.

use queuedesk_core::{BranchId, QueueDeskError};

use crate::client::ApiClient;
use crate::types::QueueEmailRequest;

impl ApiClient {
    /// `POST /queue-email`.
    pub async fn send_queue_email(&self, request: &QueueEmailRequest) -> Result<(), QueueDeskError> {
        let url = self.endpoint(&["queue-email"])?;
        self.send_empty(self.post(url).json(request)).await
    }

    /// `GET /fcmNotification/check-next-fifth?branchId=`.
    ///
    /// The response body carries nothing the client uses.
    pub async fn check_next_fifth(&self, branch_id: &BranchId) -> Result<(), QueueDeskError> {
        let mut url = self.endpoint(&["fcmNotification", "check-next-fifth"])?;
        url.query_pairs_mut().append_pair("branchId", branch_id.as_str());
        self.send_empty(self.get(url)).await
    }
}
