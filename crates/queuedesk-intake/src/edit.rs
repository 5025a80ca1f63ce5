// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Editing a stored customer from the counter.

use queuedesk_api::ApiClient;
use queuedesk_core::{CustomerId, CustomerRecord, DocumentKind, QueueDeskError};
use tracing::{info, warn};

use crate::record::{IntakeRecord, PreviewHandle, RecordPatch};

pub const CUSTOMER_SAVED: &str = "Customer information saved successfully!";
pub const CUSTOMER_SAVE_FAILED: &str = "Failed to save customer information.";

/// Working copy of a customer record.
///
/// Opens with the stored values; changes stay local until [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct CustomerEditor {
    customer_id: CustomerId,
    saved: IntakeRecord,
    record: IntakeRecord,
}

impl CustomerEditor {
    pub fn open(customer: &CustomerRecord) -> Self {
        let record = IntakeRecord::from_customer(customer);
        Self {
            customer_id: customer.id.clone(),
            saved: record.clone(),
            record,
        }
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn record(&self) -> &IntakeRecord {
        &self.record
    }

    pub fn patch(&mut self, patch: RecordPatch) {
        patch.apply(&mut self.record);
    }

    /// Replaces a document with a new image file.
    pub fn stage_document(
        &mut self,
        kind: DocumentKind,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<PreviewHandle, QueueDeskError> {
        self.record.stage_document(kind, file_name, bytes).cloned()
    }

    /// Whether anything differs from the last saved state.
    pub fn is_dirty(&self) -> bool {
        self.record != self.saved
    }

    /// Drops unsaved changes.
    pub fn discard(&mut self) {
        self.record = self.saved.clone();
    }

    /// Writes the working copy with `PUT /customer/{id}`.
    pub async fn save(&mut self, api: &ApiClient) -> Result<(), QueueDeskError> {
        api.update_customer(&self.customer_id, self.record.to_upload())
            .await
            .map_err(|e| {
                warn!(customer_id = %self.customer_id, error = %e, "customer update failed");
                e.with_message(CUSTOMER_SAVE_FAILED)
            })?;
        info!(customer_id = %self.customer_id, "customer updated");
        self.saved = self.record.clone();
        Ok(())
    }
}
