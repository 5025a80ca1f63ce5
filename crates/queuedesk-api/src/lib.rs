// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed client for the queue backend's REST surface.
//!
//! [`ApiClient`] owns the HTTP plumbing (base URL, bearer token, error
//! mapping, session teardown on 401). Endpoint wrappers are grouped by
//! resource in the submodules and all hang off the same client.

pub mod auth;
pub mod client;
pub mod counters;
pub mod customers;
pub mod notify;
pub mod queues;
pub mod types;

pub use client::ApiClient;
pub use types::{
    CreateQueueRequest, CustomerFields, CustomerUpload, DocumentUpload, QueueEmailRequest,
    QueueTicket, QueueUpdateRequest, SignInRequest, SignInResponse,
};
