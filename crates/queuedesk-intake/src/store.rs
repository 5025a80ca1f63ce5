// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intake Session Store.
//!
//! Plain state threaded between the intake steps. Nothing here validates
//! record content; the submitting step does that.

use queuedesk_core::{BranchId, CustomerId, CustomerType, QueueDeskError, QueueId, QueueTypeId, Tier};

use crate::record::{IntakeRecord, RecordPatch};

/// Highest step index (the result screen).
pub const LAST_STEP: u8 = 4;

/// The queue entry issued at the end of intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueResult {
    pub number: String,
    pub wait_estimate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeSession {
    step: u8,
    tier: Option<Tier>,
    queue_type_id: Option<QueueTypeId>,
    customer_type: Option<CustomerType>,
    record: IntakeRecord,
    customer_id: Option<CustomerId>,
    queue_id: Option<QueueId>,
    queue_result: Option<QueueResult>,
    branch_id: Option<BranchId>,
}

impl IntakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// Moves to step `n`. Indices past the result step are rejected.
    pub fn set_step(&mut self, n: u8) -> Result<(), QueueDeskError> {
        if n > LAST_STEP {
            return Err(QueueDeskError::InvalidInput(format!(
                "step {n} is outside 0..={LAST_STEP}"
            )));
        }
        self.step = n;
        Ok(())
    }

    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    pub fn queue_type_id(&self) -> Option<&QueueTypeId> {
        self.queue_type_id.as_ref()
    }

    pub fn set_tier(&mut self, tier: Tier, queue_type_id: QueueTypeId) {
        self.tier = Some(tier);
        self.queue_type_id = Some(queue_type_id);
    }

    pub fn customer_type(&self) -> Option<CustomerType> {
        self.customer_type
    }

    pub fn set_customer_type(&mut self, customer_type: CustomerType) {
        self.customer_type = Some(customer_type);
    }

    pub fn record(&self) -> &IntakeRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut IntakeRecord {
        &mut self.record
    }

    pub fn patch_record(&mut self, patch: RecordPatch) {
        patch.apply(&mut self.record);
    }

    pub fn replace_record(&mut self, record: IntakeRecord) {
        self.record = record;
    }

    pub fn customer_id(&self) -> Option<&CustomerId> {
        self.customer_id.as_ref()
    }

    pub fn set_customer_id(&mut self, customer_id: Option<CustomerId>) {
        self.customer_id = customer_id;
    }

    pub fn queue_id(&self) -> Option<&QueueId> {
        self.queue_id.as_ref()
    }

    pub fn set_queue_id(&mut self, queue_id: Option<QueueId>) {
        self.queue_id = queue_id;
    }

    pub fn queue_result(&self) -> Option<&QueueResult> {
        self.queue_result.as_ref()
    }

    pub fn set_queue_result(&mut self, number: String, wait_estimate: String) {
        self.queue_result = Some(QueueResult {
            number,
            wait_estimate,
        });
    }

    pub fn branch_id(&self) -> Option<&BranchId> {
        self.branch_id.as_ref()
    }

    pub fn set_branch_id(&mut self, branch_id: BranchId) {
        self.branch_id = Some(branch_id);
    }

    /// Back to a fresh session at the first step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
