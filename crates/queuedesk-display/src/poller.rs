// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic refresh of the public display.
//!
//! Each tick starts one refresh in the background. A tick that finds the
//! previous refresh still running is skipped, so a slow response can never
//! overwrite a newer one. Snapshots are published on a watch channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use queuedesk_api::ApiClient;
use queuedesk_config::model::DisplayConfig;
use queuedesk_state::BranchContext;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::board::{self, Board, DisplayScope, LOAD_FAILED};

/// What the display currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayState {
    #[default]
    Loading,
    Ready(Board),
    Failed(String),
}

/// Holds the in-flight flag until dropped.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct DisplayPoller {
    api: ApiClient,
    branches: BranchContext,
    scope: DisplayScope,
    interval: Duration,
    next_count: usize,
    in_flight: Arc<AtomicBool>,
    state: watch::Sender<DisplayState>,
}

impl DisplayPoller {
    pub fn new(
        api: ApiClient,
        branches: BranchContext,
        scope: DisplayScope,
        config: &DisplayConfig,
    ) -> Self {
        let (state, _) = watch::channel(DisplayState::Loading);
        Self {
            api,
            branches,
            scope,
            interval: Duration::from_secs(config.poll_interval_secs),
            next_count: config.next_count,
            in_flight: Arc::new(AtomicBool::new(false)),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }

    /// Refreshes now unless a refresh is already running.
    ///
    /// Returns the published state, or `None` when skipped.
    pub async fn poll_once(&self) -> Option<DisplayState> {
        let _guard = self.try_begin()?;
        Some(self.refresh().await)
    }

    /// Polls every interval until `cancel` fires. The first refresh starts
    /// immediately.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(scope = ?self.scope, interval_secs = self.interval.as_secs(), "display poller started");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let Some(guard) = self.try_begin() else {
                        debug!("previous refresh still running, skipping tick");
                        continue;
                    };
                    let poller = Arc::clone(&self);
                    let cancel = cancel.clone();
                    tokio::spawn(async move {
                        let _guard = guard;
                        tokio::select! {
                            _ = poller.refresh() => {}
                            _ = cancel.cancelled() => {}
                        }
                    });
                }
                _ = cancel.cancelled() => {
                    info!("display poller stopped");
                    break;
                }
            }
        }
    }

    fn try_begin(&self) -> Option<InFlight> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(Arc::clone(&self.in_flight)))
    }

    async fn refresh(&self) -> DisplayState {
        let state = match self.load().await {
            Ok(board) => DisplayState::Ready(board),
            Err(e) => {
                warn!(error = %e, "display refresh failed");
                DisplayState::Failed(LOAD_FAILED.to_string())
            }
        };
        self.state.send_replace(state.clone());
        state
    }

    async fn load(&self) -> Result<Board, queuedesk_core::QueueDeskError> {
        let branch = self.branches.active_branch().await?;
        board::fetch_board(&self.api, &branch, &self.scope, self.next_count).await
    }
}
