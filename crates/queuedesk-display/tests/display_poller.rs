// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;
use std::time::Duration;

use queuedesk_config::model::DisplayConfig;
use queuedesk_core::QueueStatus;
use queuedesk_core::traits::{BRANCH_ID_KEY, StateStore};
use queuedesk_display::{DisplayPoller, DisplayScope, DisplayState, fetch_board};
use queuedesk_state::{BranchContext, MemoryStateStore};
use queuedesk_test_utils::TestBackend;
use queuedesk_test_utils::fixtures::{counter_json, queue_entry_json};
use serde_json::json;
use tokio_util::sync::CancellationToken;

async fn mount_branch(backend: &TestBackend, branch: &str) {
    backend
        .respond(
            "GET",
            &format!("/counters/by-branch/{branch}"),
            200,
            json!([
                counter_json("k-1", "Counter 1", 1),
                counter_json("k-2", "Counter 2", 2),
            ]),
        )
        .await;
    backend
        .respond("GET", "/queues/now-serving/counter/k-1", 200, json!("BR-0002"))
        .await;
    backend
        .respond("GET", "/queues/now-serving/counter/k-2", 200, json!(""))
        .await;
    backend
        .respond(
            "GET",
            &format!("/queues/branch/{branch}"),
            200,
            json!([
                queue_entry_json("q-2", "BR-0002", QueueStatus::InProgress, Some(("k-1", 1))),
                queue_entry_json("q-9", "BR-0009", QueueStatus::Pending, None),
                queue_entry_json("q-4", "BR-0004", QueueStatus::Pending, None),
                queue_entry_json("q-1", "BR-0001", QueueStatus::Completed, Some(("k-2", 2))),
                queue_entry_json("q-6", "BR-0006", QueueStatus::Pending, None),
            ]),
        )
        .await;
}

#[tokio::test]
async fn board_shows_all_counters_and_pending_in_order() {
    let backend = TestBackend::start().await;
    mount_branch(&backend, "b-1").await;

    let board = fetch_board(&backend.api, &"b-1".into(), &DisplayScope::AllCounters, 2)
        .await
        .unwrap();

    let serving: Vec<(&str, &str)> = board
        .rows
        .iter()
        .map(|r| (r.counter.id.as_str(), r.now_serving.as_str()))
        .collect();
    assert_eq!(serving, [("k-1", "0002"), ("k-2", "0000")]);
    assert_eq!(board.next, ["0004", "0006"]);
}

#[tokio::test]
async fn single_counter_scope_only_asks_for_that_counter() {
    let backend = TestBackend::start().await;
    mount_branch(&backend, "b-1").await;

    let board = fetch_board(
        &backend.api,
        &"b-1".into(),
        &DisplayScope::Counter("k-2".into()),
        10,
    )
    .await
    .unwrap();

    assert_eq!(board.rows.len(), 1);
    assert_eq!(board.rows[0].counter.id.as_str(), "k-2");
    assert_eq!(board.next, ["0004", "0006", "0009"]);
    assert!(
        backend
            .hits("GET", "/queues/now-serving/counter/k-1")
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn poller_follows_active_branch_and_stops_on_cancel() {
    let backend = TestBackend::start().await;
    mount_branch(&backend, "b-7").await;

    let state = Arc::new(MemoryStateStore::new());
    state.set(BRANCH_ID_KEY, "b-7").await.unwrap();
    let branches = BranchContext::new(state, "b-1".into());
    let poller = Arc::new(DisplayPoller::new(
        backend.api.clone(),
        branches,
        DisplayScope::AllCounters,
        &DisplayConfig::default(),
    ));
    let mut rx = poller.subscribe();
    assert_eq!(*rx.borrow(), DisplayState::Loading);

    let cancel = CancellationToken::new();
    let task = tokio::spawn(Arc::clone(&poller).run(cancel.clone()));

    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .unwrap()
        .unwrap();
    let DisplayState::Ready(board) = rx.borrow().clone() else {
        panic!("expected a board");
    };
    assert_eq!(board.rows.len(), 2);
    assert_eq!(board.next, ["0004", "0006", "0009"]);

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .unwrap()
        .unwrap();
    assert!(backend.hits("GET", "/queues/branch/b-1").await.is_empty());
}
