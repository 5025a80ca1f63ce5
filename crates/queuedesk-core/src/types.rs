// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by every Queuedesk crate.
//!
//! Records that come back from the backend keep its camelCase field names on
//! the wire, so the same structs serve as API payloads and client state.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Returns the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Backend identifier of a queue entry.
    QueueId
);
string_id!(
    /// Backend identifier of a staffed counter.
    CounterId
);
string_id!(
    /// Backend identifier of a branch.
    BranchId
);
string_id!(
    /// Backend identifier of a customer record.
    CustomerId
);
string_id!(
    /// Backend identifier of a queue type (one per tier).
    QueueTypeId
);

/// Lifecycle status of a queue entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum QueueStatus {
    Pending,
    InProgress,
    Completed,
    Canceled,
}

impl QueueStatus {
    /// Completed and Canceled entries are closed and carry a completion time.
    pub fn is_closed(self) -> bool {
        matches!(self, QueueStatus::Completed | QueueStatus::Canceled)
    }
}

/// Residency declared on the intake form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ResidentStatus {
    Resident,
    NonResident,
}

/// Transaction-size bracket. Higher tiers require more personal data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Basic,
    Standard,
    Premium,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Basic, Tier::Standard, Tier::Premium];

    /// Tier ordinal as shown to customers (1, 2, 3).
    pub fn ordinal(self) -> u8 {
        match self {
            Tier::Basic => 1,
            Tier::Standard => 2,
            Tier::Premium => 3,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Tier> {
        Tier::ALL.into_iter().find(|t| t.ordinal() == ordinal)
    }

    /// Maps a backend queue-type name to its tier. Unknown names fall back to tier 1.
    pub fn from_queue_name(name: &str) -> Tier {
        match name.trim() {
            "Standard Tier" => Tier::Standard,
            "Premium Tier" => Tier::Premium,
            _ => Tier::Basic,
        }
    }

    /// The tier directly below this one.
    pub fn predecessor(self) -> Option<Tier> {
        match self {
            Tier::Basic => None,
            Tier::Standard => Some(Tier::Basic),
            Tier::Premium => Some(Tier::Standard),
        }
    }

    /// Transaction amount covered by the tier.
    pub fn amount_band(self) -> &'static str {
        match self {
            Tier::Basic => "Below RM3,000",
            Tier::Standard => "RM3,001 – RM10,000",
            Tier::Premium => "Above RM10,000",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {}", self.ordinal())
    }
}

/// Whether the customer transacts for themselves or for someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum CustomerType {
    #[serde(rename = "self")]
    #[strum(serialize = "self")]
    ForSelf,
    #[serde(rename = "thirdParty")]
    #[strum(serialize = "thirdParty")]
    ThirdParty,
}

/// One of the three identity documents collected for tier 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentKind {
    IdFront,
    IdBack,
    PassportFront,
}

/// Document slot, multipart field name, label.
const DOCUMENT_TABLE: [(DocumentKind, &str, &str); 3] = [
    (DocumentKind::IdFront, "idFrontImage", "ID Front"),
    (DocumentKind::IdBack, "idBackImage", "ID Back"),
    (DocumentKind::PassportFront, "passportFrontImage", "Passport Front"),
];

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::IdFront,
        DocumentKind::IdBack,
        DocumentKind::PassportFront,
    ];

    fn row(self) -> &'static (DocumentKind, &'static str, &'static str) {
        // The table lists every variant exactly once.
        let index = match self {
            DocumentKind::IdFront => 0,
            DocumentKind::IdBack => 1,
            DocumentKind::PassportFront => 2,
        };
        &DOCUMENT_TABLE[index]
    }

    /// Multipart field carrying the document file (and its URL in customer records).
    pub fn form_field(self) -> &'static str {
        self.row().1
    }

    pub fn label(self) -> &'static str {
        self.row().2
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A staffed service point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    #[serde(rename = "counterId")]
    pub id: CounterId,
    #[serde(rename = "counterName")]
    pub name: String,
    #[serde(rename = "counterNumber", default)]
    pub number: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// A physical location scoping counters and queue entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(rename = "branchId")]
    pub id: BranchId,
    #[serde(rename = "branchName", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
}

/// A backend queue type; each corresponds to one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueType {
    #[serde(rename = "queueTypeId")]
    pub id: QueueTypeId,
    #[serde(rename = "queueName")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// A stored customer as returned by lookups and embedded in queue entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    #[serde(rename = "customerId")]
    pub id: CustomerId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id_number: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub postcode: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "lenient_resident_status")]
    pub resident_status: Option<ResidentStatus>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub order_purpose: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub occupation: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nature_of_business: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nationality: String,
    #[serde(default)]
    pub id_front_image: Option<String>,
    #[serde(default)]
    pub id_back_image: Option<String>,
    #[serde(default)]
    pub passport_front_image: Option<String>,
}

impl Default for CustomerId {
    fn default() -> Self {
        CustomerId(String::new())
    }
}

impl CustomerRecord {
    /// Stored URL of a document, if the backend has one.
    pub fn document_url(&self, kind: DocumentKind) -> Option<&str> {
        match kind {
            DocumentKind::IdFront => self.id_front_image.as_deref(),
            DocumentKind::IdBack => self.id_back_image.as_deref(),
            DocumentKind::PassportFront => self.passport_front_image.as_deref(),
        }
        .filter(|url| !url.is_empty())
    }
}

/// One customer's position in a branch's service line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    #[serde(rename = "queueId")]
    pub id: QueueId,
    #[serde(rename = "queueNumber")]
    pub number: String,
    pub branch: Branch,
    pub queue_type_id: QueueTypeId,
    pub customer: CustomerRecord,
    /// Counter assigned when the entry went InProgress. The backend names this `counterId`.
    #[serde(rename = "counterId", default)]
    pub counter: Option<Counter>,
    pub status: QueueStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub estimated_wait_time: String,
}

/// The authenticated staff identity, persisted across restarts.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffSession {
    /// Staff sign-in email.
    pub id: String,
    pub name: Option<String>,
    /// Counter the staff signed in to.
    pub counter: Option<CounterId>,
    pub token: String,
}

impl fmt::Debug for StaffSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaffSession")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("counter", &self.counter)
            .field("token", &"[redacted]")
            .finish()
    }
}

/// OS-level notification permission as reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationPermission {
    Granted,
    Denied,
    Default,
}

/// The notification part of an incoming push message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_resident_status<'de, D>(deserializer: D) -> Result<Option<ResidentStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// The backend sends wait estimates as either strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn queue_status_round_trips_backend_names() {
        for (status, name) in [
            (QueueStatus::Pending, "Pending"),
            (QueueStatus::InProgress, "InProgress"),
            (QueueStatus::Completed, "Completed"),
            (QueueStatus::Canceled, "Canceled"),
        ] {
            assert_eq!(status.to_string(), name);
            assert_eq!(QueueStatus::from_str(name).unwrap(), status);
            assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{name}\""));
        }
        assert!(QueueStatus::Completed.is_closed());
        assert!(!QueueStatus::InProgress.is_closed());
    }

    #[test]
    fn resident_status_uses_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ResidentStatus::NonResident).unwrap(),
            "\"NON_RESIDENT\""
        );
        assert_eq!(
            ResidentStatus::from_str("RESIDENT").unwrap(),
            ResidentStatus::Resident
        );
    }

    #[test]
    fn tier_names_map_to_ordinals() {
        assert_eq!(Tier::from_queue_name("Basic Tier").ordinal(), 1);
        assert_eq!(Tier::from_queue_name("Standard Tier").ordinal(), 2);
        assert_eq!(Tier::from_queue_name("Premium Tier").ordinal(), 3);
        assert_eq!(Tier::from_queue_name("VIP"), Tier::Basic);
        assert_eq!(Tier::from_ordinal(4), None);
        assert_eq!(Tier::Premium.predecessor(), Some(Tier::Standard));
        assert_eq!(Tier::Basic.to_string(), "Tier 1");
    }

    #[test]
    fn customer_type_serializes_like_the_backend() {
        assert_eq!(
            serde_json::to_string(&CustomerType::ThirdParty).unwrap(),
            "\"thirdParty\""
        );
        assert_eq!(CustomerType::from_str("self").unwrap(), CustomerType::ForSelf);
    }

    #[test]
    fn document_table_maps_every_slot() {
        let fields: Vec<_> = DocumentKind::ALL.iter().map(|k| k.form_field()).collect();
        assert_eq!(fields, ["idFrontImage", "idBackImage", "passportFrontImage"]);
        assert_eq!(DocumentKind::PassportFront.label(), "Passport Front");
    }

    #[test]
    fn queue_entry_deserializes_with_nulls_and_numeric_wait() {
        let json = serde_json::json!({
            "queueId": "q-1",
            "queueNumber": "BR-0007",
            "branch": {"branchId": "b-1", "branchName": "Main", "location": null},
            "queueTypeId": "t-1",
            "customer": {
                "customerId": "c-1",
                "fullName": "Aina",
                "residentStatus": "",
                "nationality": null
            },
            "counterId": null,
            "createdAt": "2026-01-01T09:00:00",
            "status": "Pending",
            "completedAt": null,
            "estimatedWaitTime": 15
        });

        let entry: QueueEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.number, "BR-0007");
        assert_eq!(entry.branch.location, "");
        assert!(entry.counter.is_none());
        assert_eq!(entry.customer.resident_status, None);
        assert_eq!(entry.customer.nationality, "");
        assert_eq!(entry.estimated_wait_time, "15");
    }

    #[test]
    fn customer_document_urls_ignore_blanks() {
        let customer = CustomerRecord {
            id_front_image: Some("https://cdn/front.png".into()),
            id_back_image: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            customer.document_url(DocumentKind::IdFront),
            Some("https://cdn/front.png")
        );
        assert_eq!(customer.document_url(DocumentKind::IdBack), None);
        assert_eq!(customer.document_url(DocumentKind::PassportFront), None);
    }

    #[test]
    fn staff_session_debug_redacts_token() {
        let session = StaffSession {
            id: "staff@branch".into(),
            name: Some("Nur".into()),
            counter: Some(CounterId::from("c-1")),
            token: "secret-token".into(),
        };
        let debug = format!("{session:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[redacted]"));
    }
}
