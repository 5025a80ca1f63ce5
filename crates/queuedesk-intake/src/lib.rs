// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer intake for the Queuedesk client.
//!
//! [`IntakeSession`] holds the registration in progress, [`StepFlow`] drives
//! it through tier selection, customer type, identification and the tiered
//! form to an issued queue number, and [`ResultScreen`] presents that number.
//! [`CustomerEditor`] reopens a stored customer for changes.

pub mod edit;
pub mod flow;
pub mod form;
pub mod record;
pub mod result;
pub mod store;
pub mod tiers;

pub use edit::CustomerEditor;
pub use flow::{IdentifyOutcome, Step, StepFlow};
pub use form::{FormField, missing_fields, required_fields};
pub use record::{DocumentSlot, IntakeRecord, PreviewHandle, RecordPatch, StagedDocument};
pub use result::ResultScreen;
pub use store::{IntakeSession, QueueResult};
pub use tiers::{TierOption, load_tiers};
