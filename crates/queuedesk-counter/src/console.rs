// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Counter Console.
//!
//! Mirrors the branch queue list and a counter -> now-serving map locally.
//! Both are replaced on [`CounterConsole::load`] and patched in place after
//! each successful status write. At most one entry is InProgress per counter;
//! the console checks this before calling the next customer, the backend
//! stays authoritative.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use queuedesk_api::{ApiClient, QueueUpdateRequest};
use queuedesk_config::model::CounterConfig;
use queuedesk_core::{
    BranchId, Counter, CounterId, NoticeSlot, QueueDeskError, QueueEntry, QueueId, QueueStatus,
    StaffSession, trailing_sequence,
};
use queuedesk_intake::CustomerEditor;
use queuedesk_state::SessionStore;
use tracing::{debug, info, warn};

use crate::listing::{self, ListingQuery, Page};

pub const LOAD_FAILED: &str = "Failed to load data. Please try again.";
pub const COUNTER_BUSY: &str = "Cannot assign new queue while counter has an active queue. Please complete or cancel the current queue first.";
pub const UPDATE_FAILED: &str = "Failed to update queue status. Please try again.";
pub const SIGN_OUT_BLOCKED: &str =
    "Please complete or cancel all active queues before signing out.";

pub struct CounterConsole {
    api: ApiClient,
    sessions: SessionStore,
    staff: StaffSession,
    branch: BranchId,
    counter: Option<Counter>,
    queues: Vec<QueueEntry>,
    serving: BTreeMap<CounterId, String>,
    notice: NoticeSlot,
    error: Option<String>,
    page_size: usize,
}

impl CounterConsole {
    /// Opens the console for the signed-in staff member.
    ///
    /// Fails with [`QueueDeskError::Unauthorized`] when nobody is signed in.
    /// Nothing is fetched until [`load`](Self::load).
    pub async fn open(
        api: ApiClient,
        sessions: SessionStore,
        branch: BranchId,
        config: &CounterConfig,
    ) -> Result<Self, QueueDeskError> {
        let staff = sessions
            .restore()
            .await?
            .ok_or(QueueDeskError::Unauthorized)?;
        Ok(Self {
            api,
            sessions,
            staff,
            branch,
            counter: None,
            queues: Vec::new(),
            serving: BTreeMap::new(),
            notice: NoticeSlot::new(Duration::from_secs(config.notice_secs)),
            error: None,
            page_size: config.page_size,
        })
    }

    /// Replaces the counter, queue list and now-serving map from the backend.
    pub async fn load(&mut self) -> Result<(), QueueDeskError> {
        let fetched = tokio::try_join!(
            self.api.counters(),
            self.api.queues_by_branch(&self.branch)
        );
        let (counters, queues) = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(branch_id = %self.branch, error = %e, "failed to load counter console");
                self.error = Some(LOAD_FAILED.to_string());
                return Err(e.with_message(LOAD_FAILED));
            }
        };

        self.counter = counters
            .into_iter()
            .find(|c| self.staff.counter.as_ref() == Some(&c.id));
        if self.counter.is_none() {
            warn!(staff = %self.staff.id, "assigned counter not found");
        }

        self.serving = queues
            .iter()
            .filter(|q| q.status == QueueStatus::InProgress)
            .filter_map(|q| q.counter.as_ref().map(|c| (c.id.clone(), q.number.clone())))
            .collect();
        self.queues = queues;
        self.error = None;
        debug!(
            branch_id = %self.branch,
            entries = self.queues.len(),
            serving = self.serving.len(),
            "counter console loaded"
        );
        Ok(())
    }

    pub fn staff(&self) -> &StaffSession {
        &self.staff
    }

    /// The counter the staff signed in to, once loaded.
    pub fn counter(&self) -> Option<&Counter> {
        self.counter.as_ref()
    }

    pub fn queues(&self) -> &[QueueEntry] {
        &self.queues
    }

    /// Counter id -> queue number currently served there.
    pub fn serving(&self) -> &BTreeMap<CounterId, String> {
        &self.serving
    }

    /// Number currently served at this console's counter.
    pub fn now_serving(&self) -> Option<&str> {
        let counter = self.counter.as_ref()?;
        self.serving.get(&counter.id).map(String::as_str)
    }

    /// Guard refusal while it is visible.
    pub fn notice(&mut self) -> Option<&str> {
        self.notice.current()
    }

    /// Last load or update failure. Cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn listing(&self, query: &ListingQuery) -> Page<'_> {
        listing::list(&self.queues, query, self.page_size)
    }

    /// Moves the lowest Pending entry to InProgress at this counter.
    ///
    /// Returns `Ok(None)` when nothing is pending. Refused without any
    /// backend call while the counter is already serving someone. The
    /// next-fifth signal is sent first and its outcome ignored.
    pub async fn call_next(&mut self) -> Result<Option<QueueEntry>, QueueDeskError> {
        let counter_id = self.assigned_counter_id()?;
        if self.serving.contains_key(&counter_id) {
            self.notice.show(COUNTER_BUSY);
            return Err(QueueDeskError::Guard(COUNTER_BUSY.to_string()));
        }

        if let Err(e) = self.api.check_next_fifth(&self.branch).await {
            warn!(branch_id = %self.branch, error = %e, "next-fifth check failed");
        }

        let Some(next) = self
            .queues
            .iter()
            .filter(|q| q.status == QueueStatus::Pending)
            .min_by_key(|q| trailing_sequence(&q.number))
            .map(|q| q.id.clone())
        else {
            debug!(counter_id = %counter_id, "no pending entries");
            return Ok(None);
        };

        self.update_status(&next, QueueStatus::InProgress).await?;
        Ok(self.queues.iter().find(|q| q.id == next).cloned())
    }

    /// Moves an entry to `target` (InProgress, Completed or Canceled).
    ///
    /// InProgress assigns this console's counter. Closing keeps the counter
    /// the entry was served at and stamps the completion time. The local
    /// list and map change only after the backend accepted the update.
    pub async fn update_status(
        &mut self,
        queue_id: &QueueId,
        target: QueueStatus,
    ) -> Result<(), QueueDeskError> {
        if target == QueueStatus::Pending {
            return Err(QueueDeskError::InvalidInput(
                "entries cannot be returned to Pending".into(),
            ));
        }
        let entry = self
            .queues
            .iter()
            .find(|q| &q.id == queue_id)
            .ok_or_else(|| QueueDeskError::NotFound {
                what: format!("queue {queue_id}"),
            })?;

        let selected = self.counter.as_ref().map(|c| c.id.clone());
        let recorded = entry
            .counter
            .as_ref()
            .map(|c| c.id.clone())
            .or_else(|| selected.clone());
        let completed_at = target
            .is_closed()
            .then(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

        let request = QueueUpdateRequest {
            branch_id: entry.branch.id.clone(),
            queue_type_id: entry.queue_type_id.clone(),
            customer_id: entry.customer.id.clone(),
            status: target,
            counter_id: if target == QueueStatus::InProgress {
                selected
            } else {
                recorded.clone()
            },
            completed_at: completed_at.clone(),
        };

        if let Err(e) = self.api.update_queue(queue_id, &request).await {
            warn!(queue_id = %queue_id, status = %target, error = %e, "queue status update failed");
            self.error = Some(UPDATE_FAILED.to_string());
            return Err(e.with_message(UPDATE_FAILED));
        }
        self.error = None;

        let mut number = String::new();
        if let Some(entry) = self.queues.iter_mut().find(|q| &q.id == queue_id) {
            entry.status = target;
            if target == QueueStatus::InProgress {
                entry.counter = self.counter.clone();
            }
            entry.completed_at = completed_at;
            number = entry.number.clone();
        }

        if let Some(counter_id) = recorded {
            match target {
                QueueStatus::InProgress => {
                    self.serving.insert(counter_id, number.clone());
                }
                QueueStatus::Completed | QueueStatus::Canceled => {
                    self.serving.remove(&counter_id);
                }
                QueueStatus::Pending => {}
            }
        }
        info!(queue_id = %queue_id, queue_number = %number, status = %target, "queue status changed");
        Ok(())
    }

    /// Opens the customer of an entry for editing.
    pub fn edit_customer(&self, queue_id: &QueueId) -> Result<CustomerEditor, QueueDeskError> {
        self.queues
            .iter()
            .find(|q| &q.id == queue_id)
            .map(|q| CustomerEditor::open(&q.customer))
            .ok_or_else(|| QueueDeskError::NotFound {
                what: format!("queue {queue_id}"),
            })
    }

    /// Signs the staff out unless this counter is still serving someone.
    pub async fn sign_out(&mut self) -> Result<(), QueueDeskError> {
        let busy = self
            .staff
            .counter
            .as_ref()
            .is_some_and(|id| self.serving.contains_key(id));
        if busy {
            self.notice.show(SIGN_OUT_BLOCKED);
            return Err(QueueDeskError::Guard(SIGN_OUT_BLOCKED.to_string()));
        }
        self.sessions.sign_out().await
    }

    fn assigned_counter_id(&self) -> Result<CounterId, QueueDeskError> {
        self.counter
            .as_ref()
            .map(|c| c.id.clone())
            .ok_or_else(|| QueueDeskError::NotFound {
                what: "assigned counter".into(),
            })
    }
}
