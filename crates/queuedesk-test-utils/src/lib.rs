// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Queuedesk integration tests.
//!
//! Provides a mock backend harness, response fixtures and mock push adapters
//! for fast, deterministic tests without a real queue backend.
//!
//! # Components
//!
//! - [`TestBackend`] - wiremock server with a wired `ApiClient` and state store
//! - [`fixtures`] - JSON bodies shaped like backend responses
//! - [`RecordingAlertSink`] / [`FixedTokenSource`] - push adapters for assertions

pub mod fixtures;
pub mod harness;
pub mod mock_push;

pub use harness::{TestBackend, staff_session};
pub use mock_push::{Alert, FixedTokenSource, RecordingAlertSink};
