// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response bodies that exist only on the wire.
//!
//! Records the client keeps around (queue entries, counters, customers) live
//! in `queuedesk_core::types` and are deserialized directly.

use std::fmt;

use queuedesk_core::{
    BranchId, CounterId, CustomerId, CustomerRecord, DocumentKind, QueueId, QueueStatus,
    QueueTypeId, ResidentStatus,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Body of `POST /auth/signIn/{counterId}`.
#[derive(Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
}

fn expose_password<S: Serializer>(password: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

/// Successful sign-in.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub staff_name: Option<String>,
}

impl fmt::Debug for SignInResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInResponse")
            .field("token", &"[redacted]")
            .field("message", &self.message)
            .field("staff_name", &self.staff_name)
            .finish()
    }
}

/// Body of `POST /queues/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQueueRequest {
    pub branch_id: BranchId,
    pub queue_type_id: QueueTypeId,
    pub customer_id: CustomerId,
}

/// The parts of a created queue entry the intake flow keeps.
///
/// Deserializes from the backend's full queue-entry response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueTicket {
    #[serde(rename = "queueId")]
    pub id: QueueId,
    #[serde(rename = "queueNumber")]
    pub number: String,
    #[serde(default, deserialize_with = "wait_as_text")]
    pub estimated_wait_time: String,
}

/// Body of `PUT /queues/update/{queueId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueUpdateRequest {
    pub branch_id: BranchId,
    pub queue_type_id: QueueTypeId,
    pub customer_id: CustomerId,
    pub status: QueueStatus,
    pub counter_id: Option<CounterId>,
    /// ISO-8601 timestamp, set only for Completed and Canceled.
    pub completed_at: Option<String>,
}

/// Body of `POST /queue-email`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEmailRequest {
    pub email: String,
    pub queue_number: String,
    pub customer_name: String,
    pub estimated_wait_time: u64,
}

/// Body of `PUT /customer/customerFcmToken/{id}`.
#[derive(Clone, Serialize)]
pub(crate) struct PushTokenRequest<'a> {
    pub token: &'a str,
}

/// The fourteen text fields of a customer record, as sent in multipart uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFields {
    pub full_name: String,
    pub date_of_birth: String,
    pub id_number: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub state: String,
    pub country: String,
    pub phone_number: String,
    pub resident_status: Option<ResidentStatus>,
    pub order_purpose: String,
    pub occupation: String,
    pub nature_of_business: String,
    pub nationality: String,
}

impl CustomerFields {
    /// Multipart field names and values in upload order. Unset values are blank.
    pub fn form_pairs(&self) -> [(&'static str, String); 14] {
        [
            ("fullName", self.full_name.clone()),
            ("dateOfBirth", self.date_of_birth.clone()),
            ("idNumber", self.id_number.clone()),
            ("address", self.address.clone()),
            ("city", self.city.clone()),
            ("postcode", self.postcode.clone()),
            ("state", self.state.clone()),
            ("country", self.country.clone()),
            ("phoneNumber", self.phone_number.clone()),
            (
                "residentStatus",
                self.resident_status.map(|s| s.to_string()).unwrap_or_default(),
            ),
            ("orderPurpose", self.order_purpose.clone()),
            ("occupation", self.occupation.clone()),
            ("natureOfBusiness", self.nature_of_business.clone()),
            ("nationality", self.nationality.clone()),
        ]
    }
}

impl From<&CustomerRecord> for CustomerFields {
    fn from(record: &CustomerRecord) -> Self {
        Self {
            full_name: record.full_name.clone(),
            date_of_birth: record.date_of_birth.clone(),
            id_number: record.id_number.clone(),
            address: record.address.clone(),
            city: record.city.clone(),
            postcode: record.postcode.clone(),
            state: record.state.clone(),
            country: record.country.clone(),
            phone_number: record.phone_number.clone(),
            resident_status: record.resident_status,
            order_purpose: record.order_purpose.clone(),
            occupation: record.occupation.clone(),
            nature_of_business: record.nature_of_business.clone(),
            nationality: record.nationality.clone(),
        }
    }
}

/// A document file attached to a customer upload.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub kind: DocumentKind,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("kind", &self.kind)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Multipart payload of `POST /customer` and `PUT /customer/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUpload {
    pub fields: CustomerFields,
    pub documents: Vec<DocumentUpload>,
}

impl CustomerUpload {
    pub(crate) fn into_form(self) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields.form_pairs() {
            form = form.text(name, value);
        }
        for doc in self.documents {
            let part = reqwest::multipart::Part::bytes(doc.bytes)
                .file_name(doc.file_name)
                .mime_str(&doc.content_type)?;
            form = form.part(doc.kind.form_field(), part);
        }
        Ok(form)
    }
}

fn wait_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_uses_backend_names() {
        let request = QueueUpdateRequest {
            branch_id: "b-1".into(),
            queue_type_id: "t-1".into(),
            customer_id: "c-1".into(),
            status: QueueStatus::Completed,
            counter_id: Some("k-1".into()),
            completed_at: Some("2026-01-01T10:00:00Z".into()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["branchId"], "b-1");
        assert_eq!(json["queueTypeId"], "t-1");
        assert_eq!(json["customerId"], "c-1");
        assert_eq!(json["status"], "Completed");
        assert_eq!(json["counterId"], "k-1");
        assert_eq!(json["completedAt"], "2026-01-01T10:00:00Z");
    }

    #[test]
    fn ticket_reads_full_queue_entry() {
        let ticket: QueueTicket = serde_json::from_value(serde_json::json!({
            "queueId": "q-9",
            "queueNumber": "BR-0009",
            "status": "Pending",
            "estimatedWaitTime": 25
        }))
        .unwrap();
        assert_eq!(ticket.number, "BR-0009");
        assert_eq!(ticket.estimated_wait_time, "25");
    }

    #[test]
    fn form_pairs_keep_upload_order_and_blank_unset_values() {
        let fields = CustomerFields {
            full_name: "Aina".into(),
            resident_status: Some(ResidentStatus::NonResident),
            ..Default::default()
        };
        let pairs = fields.form_pairs();
        assert_eq!(pairs[0], ("fullName", "Aina".to_string()));
        assert_eq!(pairs[9], ("residentStatus", "NON_RESIDENT".to_string()));
        assert_eq!(pairs[13], ("nationality", String::new()));
    }

    #[test]
    fn secrets_are_redacted_in_debug() {
        let request = SignInRequest {
            email: "staff@branch".into(),
            password: SecretString::from("hunter2"),
        };
        assert!(!format!("{request:?}").contains("hunter2"));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["password"], "hunter2");
    }
}
