// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON bodies shaped like the backend's responses.

use queuedesk_core::QueueStatus;
use serde_json::{Value, json};

/// Branch every fixture belongs to.
pub const BRANCH_ID: &str = "b-1";

pub fn counter_json(id: &str, name: &str, number: u32) -> Value {
    json!({
        "counterId": id,
        "counterName": name,
        "counterNumber": number,
        "description": format!("{name} desk"),
    })
}

pub fn customer_json(id: &str, id_number: &str, full_name: &str) -> Value {
    json!({
        "customerId": id,
        "fullName": full_name,
        "dateOfBirth": "1990-04-12",
        "idNumber": id_number,
        "address": "12 Jalan Ampang",
        "city": "Kuala Lumpur",
        "postcode": "50450",
        "state": "WP",
        "country": "Malaysia",
        "phoneNumber": "+60123456789",
        "residentStatus": "RESIDENT",
        "orderPurpose": "Travel",
        "occupation": "Engineer",
        "natureOfBusiness": "Software",
        "nationality": "Malaysian",
        "idFrontImage": format!("https://files.example/{id}/id-front.png"),
        "idBackImage": format!("https://files.example/{id}/id-back.png"),
        "passportFrontImage": null,
    })
}

/// A queue entry; `counter` is `(id, number)` of the assigned counter.
pub fn queue_entry_json(
    id: &str,
    number: &str,
    status: QueueStatus,
    counter: Option<(&str, u32)>,
) -> Value {
    let counter = counter.map(|(counter_id, n)| counter_json(counter_id, &format!("Counter {n}"), n));
    let completed_at = status.is_closed().then_some("2026-03-02T10:15:00Z");
    json!({
        "queueId": id,
        "queueNumber": number,
        "branch": { "branchId": BRANCH_ID, "branchName": "Mid Valley", "location": "KL" },
        "queueTypeId": "t-1",
        "customer": customer_json(&format!("c-{id}"), &format!("ID-{id}"), &format!("Customer {id}")),
        "counterId": counter,
        "status": status.to_string(),
        "createdAt": "2026-03-02T09:00:00Z",
        "completedAt": completed_at,
        "estimatedWaitTime": 15,
    })
}

pub fn queue_type_json(id: &str, name: &str) -> Value {
    json!({ "queueTypeId": id, "queueName": name, "description": format!("{name} transactions") })
}

/// The three backend queue types, deliberately out of tier order.
pub fn tier_catalogue_json() -> Value {
    json!([
        queue_type_json("t-3", "Premium Tier"),
        queue_type_json("t-1", "Basic Tier"),
        queue_type_json("t-2", "Standard Tier"),
    ])
}
