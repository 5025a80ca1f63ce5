// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer lookup, create, update and push-token registration.

use queuedesk_core::{CustomerId, CustomerRecord, QueueDeskError};
use tracing::debug;

use crate::client::ApiClient;
use crate::types::{CustomerUpload, PushTokenRequest};

impl ApiClient {
    /// `GET /customer/by-id-number/{idNumber}`.
    ///
    /// A 404 or an empty/`null` body is a miss, not an error.
    pub async fn customer_by_id_number(
        &self,
        id_number: &str,
    ) -> Result<Option<CustomerRecord>, QueueDeskError> {
        let url = self.endpoint(&["customer", "by-id-number", id_number])?;
        let body: Option<serde_json::Value> = match self.send_json(self.get(url)).await {
            Ok(body) => body,
            Err(QueueDeskError::Api { status: 404, .. }) => None,
            // An empty 200 body does not parse as JSON.
            Err(QueueDeskError::Internal(_)) => None,
            Err(e) => return Err(e),
        };

        match body {
            None | Some(serde_json::Value::Null) => {
                debug!("customer lookup missed");
                Ok(None)
            }
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                QueueDeskError::Internal(format!("failed to parse customer record: {e}"))
            }),
        }
    }

    /// `POST /customer` (multipart). Returns the stored record with its id.
    pub async fn create_customer(
        &self,
        upload: CustomerUpload,
    ) -> Result<CustomerRecord, QueueDeskError> {
        let url = self.endpoint(&["customer"])?;
        let form = upload.into_form().map_err(invalid_document)?;
        self.send_json(self.post(url).multipart(form)).await
    }

    /// `PUT /customer/{id}` (multipart).
    pub async fn update_customer(
        &self,
        customer_id: &CustomerId,
        upload: CustomerUpload,
    ) -> Result<(), QueueDeskError> {
        let url = self.endpoint(&["customer", customer_id.as_str()])?;
        let form = upload.into_form().map_err(invalid_document)?;
        self.send_empty(self.put(url).multipart(form)).await
    }

    /// `PUT /customer/customerFcmToken/{id}`.
    pub async fn register_push_token(
        &self,
        customer_id: &CustomerId,
        token: &str,
    ) -> Result<(), QueueDeskError> {
        let url = self.endpoint(&["customer", "customerFcmToken", customer_id.as_str()])?;
        self.send_empty(self.put(url).json(&PushTokenRequest { token }))
            .await
    }
}

fn invalid_document(e: reqwest::Error) -> QueueDeskError {
    QueueDeskError::InvalidInput(format!("document cannot be attached: {e}"))
}
