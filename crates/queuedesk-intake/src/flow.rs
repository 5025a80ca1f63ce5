// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Step Flow Orchestrator.
//!
//! Five steps in a fixed order:
//!
//! ```text
//! TierSelect -> CustomerType -> Identify -> FormDetails -> Result
//! ```
//!
//! Every step except `TierSelect` can go back exactly one step. There is no
//! forward skip apart from a successful identification, which issues the
//! queue entry straight away and lands on `Result`. Actions called from the
//! wrong step fail with [`QueueDeskError::InvalidTransition`] and leave the
//! session untouched.

use std::time::Duration;

use queuedesk_api::{ApiClient, CreateQueueRequest, QueueTicket};
use queuedesk_config::model::IntakeConfig;
use queuedesk_core::{
    CustomerId, CustomerRecord, CustomerType, DocumentKind, QueueDeskError,
};
use queuedesk_push::PushRegistrar;
use strum::Display;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::form::{self, FormField};
use crate::record::{DocumentSlot, IntakeRecord, PreviewHandle, RecordPatch};
use crate::store::{IntakeSession, QueueResult};
use crate::tiers::TierOption;

pub const NOT_FOUND_NOTICE: &str =
    "Customer not found. Please fill in your details in the next step.";
pub const SAVE_FAILED: &str = "Failed to save customer data. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Step {
    TierSelect,
    CustomerType,
    Identify,
    FormDetails,
    Result,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::TierSelect,
        Step::CustomerType,
        Step::Identify,
        Step::FormDetails,
        Step::Result,
    ];

    pub fn index(self) -> u8 {
        match self {
            Step::TierSelect => 0,
            Step::CustomerType => 1,
            Step::Identify => 2,
            Step::FormDetails => 3,
            Step::Result => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<Step> {
        Step::ALL.get(usize::from(index)).copied()
    }

    /// The step "Back" returns to.
    pub fn previous(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Step::from_index)
    }
}

/// Result of an identification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifyOutcome {
    /// Known customer; the queue entry was issued and the flow is at `Result`.
    Queued(QueueResult),
    /// No usable match; the flow moved on to `FormDetails`.
    NotFound,
}

pub struct StepFlow {
    api: ApiClient,
    push: PushRegistrar,
    session: IntakeSession,
    lookup_miss_delay: Duration,
    notice: watch::Sender<Option<String>>,
}

impl StepFlow {
    pub fn new(
        api: ApiClient,
        push: PushRegistrar,
        session: IntakeSession,
        lookup_miss_delay: Duration,
    ) -> Self {
        let (notice, _) = watch::channel(None);
        Self {
            api,
            push,
            session,
            lookup_miss_delay,
            notice,
        }
    }

    pub fn from_config(
        api: ApiClient,
        push: PushRegistrar,
        session: IntakeSession,
        config: &IntakeConfig,
    ) -> Self {
        Self::new(
            api,
            push,
            session,
            Duration::from_millis(config.lookup_miss_delay_ms),
        )
    }

    pub fn step(&self) -> Step {
        Step::from_index(self.session.step()).unwrap_or(Step::TierSelect)
    }

    pub fn session(&self) -> &IntakeSession {
        &self.session
    }

    /// Inline notices of the current step. `None` when nothing is shown.
    pub fn subscribe_notices(&self) -> watch::Receiver<Option<String>> {
        self.notice.subscribe()
    }

    /// Starts over at `TierSelect`, keeping the active branch.
    pub fn restart(&mut self) {
        let branch = self.session.branch_id().cloned();
        self.session.reset();
        if let Some(branch) = branch {
            self.session.set_branch_id(branch);
        }
        self.notice.send_replace(None);
    }

    pub fn select_tier(&mut self, option: &TierOption) -> Result<Step, QueueDeskError> {
        self.expect(Step::TierSelect, "select a tier")?;
        self.session
            .set_tier(option.tier, option.queue_type_id.clone());
        debug!(tier = %option.tier, "tier selected");
        self.go_to(Step::CustomerType)
    }

    pub fn choose_customer_type(
        &mut self,
        customer_type: CustomerType,
    ) -> Result<Step, QueueDeskError> {
        self.expect(Step::CustomerType, "choose a customer type")?;
        self.session.set_customer_type(customer_type);
        self.go_to(Step::Identify)
    }

    /// One step back.
    pub fn back(&mut self) -> Result<Step, QueueDeskError> {
        let current = self.step();
        let previous = current
            .previous()
            .ok_or_else(|| QueueDeskError::InvalidTransition {
                from: current.to_string(),
                action: "go back".into(),
            })?;
        self.go_to(previous)
    }

    /// Looks up the customer by id number.
    ///
    /// A match issues the queue entry immediately. A miss, a lookup error or
    /// a failure to issue the entry publishes the not-found notice, waits the
    /// configured delay and moves to `FormDetails` with only the entered id
    /// number(s) filled in.
    pub async fn identify(
        &mut self,
        id_number: &str,
        third_party_id_number: Option<&str>,
    ) -> Result<IdentifyOutcome, QueueDeskError> {
        self.expect(Step::Identify, "identify a customer")?;
        let id_number = id_number.trim();
        if id_number.is_empty() {
            return Err(QueueDeskError::InvalidInput(
                "IC/Passport number is required".into(),
            ));
        }
        let third_party = match self.session.customer_type() {
            Some(CustomerType::ThirdParty) => third_party_id_number
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            _ => None,
        };

        match self.queue_known_customer(id_number, third_party.clone()).await {
            Ok(Some(result)) => return Ok(IdentifyOutcome::Queued(result)),
            Ok(None) => info!("customer not found, continuing to manual intake"),
            Err(e) => warn!(error = %e, "identification failed, continuing to manual intake"),
        }

        self.session.set_customer_id(None);
        self.session.patch_record(RecordPatch {
            id_number: Some(id_number.to_string()),
            third_party_id_number: third_party,
            ..Default::default()
        });
        self.notice.send_replace(Some(NOT_FOUND_NOTICE.to_string()));
        tokio::time::sleep(self.lookup_miss_delay).await;
        self.go_to(Step::FormDetails)?;
        Ok(IdentifyOutcome::NotFound)
    }

    async fn queue_known_customer(
        &mut self,
        id_number: &str,
        third_party: Option<String>,
    ) -> Result<Option<QueueResult>, QueueDeskError> {
        let Some(customer) = self.api.customer_by_id_number(id_number).await? else {
            return Ok(None);
        };
        self.session.set_customer_id(Some(customer.id.clone()));
        self.push.register(&customer.id).await;

        let ticket = self.create_queue(&customer.id).await?;

        let mut record = IntakeRecord::from_customer(&customer);
        record.third_party_id_number = third_party;
        self.session.replace_record(record);
        Ok(Some(self.finish(ticket)?))
    }

    /// Applies typed form input.
    pub fn update_form(&mut self, patch: RecordPatch) -> Result<(), QueueDeskError> {
        self.expect(Step::FormDetails, "edit the form")?;
        self.session.patch_record(patch);
        Ok(())
    }

    pub fn stage_document(
        &mut self,
        kind: DocumentKind,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<PreviewHandle, QueueDeskError> {
        self.expect(Step::FormDetails, "attach a document")?;
        self.session
            .record_mut()
            .stage_document(kind, file_name, bytes)
            .cloned()
    }

    pub fn remove_document(&mut self, kind: DocumentKind) -> Result<Option<DocumentSlot>, QueueDeskError> {
        self.expect(Step::FormDetails, "remove a document")?;
        Ok(self.session.record_mut().remove_document(kind))
    }

    /// Required fields of the selected tier still blank.
    pub fn missing_fields(&self) -> Vec<FormField> {
        match self.session.tier() {
            Some(tier) => form::missing_fields(self.session.record(), tier),
            None => Vec::new(),
        }
    }

    /// Submits the form: stores the customer, issues the queue entry and
    /// moves to `Result`.
    ///
    /// Blank required fields are refused before any backend call. A backend
    /// failure keeps the form as entered and carries the banner text.
    pub async fn submit(&mut self) -> Result<QueueResult, QueueDeskError> {
        self.expect(Step::FormDetails, "submit the form")?;
        let tier = self
            .session
            .tier()
            .ok_or_else(|| QueueDeskError::Internal("no tier selected".into()))?;
        form::check_required(self.session.record(), tier)?;

        let saved: CustomerRecord = self
            .api
            .create_customer(self.session.record().to_upload())
            .await
            .map_err(|e| save_failed("failed to store customer", e))?;
        self.session.set_customer_id(Some(saved.id.clone()));

        let ticket = self
            .create_queue(&saved.id)
            .await
            .map_err(|e| save_failed("failed to create queue entry", e))?;
        self.push.register(&saved.id).await;

        self.finish(ticket)
    }

    async fn create_queue(&self, customer_id: &CustomerId) -> Result<QueueTicket, QueueDeskError> {
        let branch_id = self
            .session
            .branch_id()
            .cloned()
            .ok_or_else(|| QueueDeskError::InvalidInput("no active branch".into()))?;
        let queue_type_id = self
            .session
            .queue_type_id()
            .cloned()
            .ok_or_else(|| QueueDeskError::Internal("no tier selected".into()))?;
        self.api
            .create_queue(&CreateQueueRequest {
                branch_id,
                queue_type_id,
                customer_id: customer_id.clone(),
            })
            .await
    }

    fn finish(&mut self, ticket: QueueTicket) -> Result<QueueResult, QueueDeskError> {
        info!(queue_id = %ticket.id, queue_number = %ticket.number, "queue entry issued");
        self.session.set_queue_id(Some(ticket.id));
        self.session
            .set_queue_result(ticket.number, ticket.estimated_wait_time);
        self.go_to(Step::Result)?;
        self.session
            .queue_result()
            .cloned()
            .ok_or_else(|| QueueDeskError::Internal("queue result was not stored".into()))
    }

    fn expect(&self, step: Step, action: &str) -> Result<(), QueueDeskError> {
        let current = self.step();
        if current != step {
            return Err(QueueDeskError::InvalidTransition {
                from: current.to_string(),
                action: action.to_string(),
            });
        }
        Ok(())
    }

    fn go_to(&mut self, step: Step) -> Result<Step, QueueDeskError> {
        self.session.set_step(step.index())?;
        self.notice.send_replace(None);
        Ok(step)
    }
}

fn save_failed(context: &str, err: QueueDeskError) -> QueueDeskError {
    warn!(error = %err, "{context}");
    err.with_message(SAVE_FAILED)
}
