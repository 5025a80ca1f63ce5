// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Counter reference data.

use queuedesk_core::{BranchId, Counter, QueueDeskError};

use crate::client::ApiClient;

impl ApiClient {
    /// `GET /counters`: every counter the backend knows.
    pub async fn counters(&self) -> Result<Vec<Counter>, QueueDeskError> {
        let url = self.endpoint(&["counters"])?;
        self.send_json(self.get(url)).await
    }

    /// `GET /counters/by-branch/{branchId}`.
    pub async fn counters_by_branch(
        &self,
        branch_id: &BranchId,
    ) -> Result<Vec<Counter>, QueueDeskError> {
        let url = self.endpoint(&["counters", "by-branch", branch_id.as_str()])?;
        self.send_json(self.get(url)).await
    }
}
