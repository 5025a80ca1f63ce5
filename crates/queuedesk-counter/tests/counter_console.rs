// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Counter console against a mock backend.

use std::time::Duration;

use queuedesk_config::model::CounterConfig;
use queuedesk_core::{CounterId, QueueDeskError, QueueId, QueueStatus};
use queuedesk_counter::CounterConsole;
use queuedesk_counter::console::{COUNTER_BUSY, LOAD_FAILED, SIGN_OUT_BLOCKED, UPDATE_FAILED};
use queuedesk_state::SessionStore;
use queuedesk_test_utils::fixtures::{BRANCH_ID, counter_json, queue_entry_json};
use queuedesk_test_utils::{TestBackend, staff_session};
use serde_json::{Value, json};

async fn backend_with(queues: Value) -> TestBackend {
    let backend = TestBackend::start().await;
    backend
        .respond(
            "GET",
            "/counters",
            200,
            json!([
                counter_json("k-1", "Counter 1", 1),
                counter_json("k-2", "Counter 2", 2),
            ]),
        )
        .await;
    backend.respond("GET", "/queues/branch/b-1", 200, queues).await;
    backend
        .respond_empty("GET", "/fcmNotification/check-next-fifth", 200)
        .await;
    backend
}

async fn open_console(backend: &TestBackend) -> CounterConsole {
    backend.sign_in_as(&staff_session("k-1")).await.unwrap();
    let sessions = SessionStore::new(backend.api.clone(), backend.state.clone());
    let mut console = CounterConsole::open(
        backend.api.clone(),
        sessions,
        BRANCH_ID.into(),
        &CounterConfig::default(),
    )
    .await
    .unwrap();
    console.load().await.unwrap();
    console
}

async fn put_body(backend: &TestBackend, queue_id: &str) -> Value {
    let hits = backend
        .hits("PUT", &format!("/queues/update/{queue_id}"))
        .await;
    assert_eq!(hits.len(), 1, "expected exactly one update for {queue_id}");
    serde_json::from_slice(&hits[0].body).unwrap()
}

#[tokio::test]
async fn load_resolves_counter_and_serving_map() {
    let backend = backend_with(json!([
        queue_entry_json("q-1", "BR-0001", QueueStatus::Completed, Some(("k-1", 1))),
        queue_entry_json("q-2", "BR-0002", QueueStatus::InProgress, Some(("k-2", 2))),
        queue_entry_json("q-3", "BR-0003", QueueStatus::Pending, None),
    ]))
    .await;
    let console = open_console(&backend).await;

    assert_eq!(console.counter().unwrap().id, CounterId::from("k-1"));
    assert_eq!(console.queues().len(), 3);
    assert_eq!(console.serving().len(), 1);
    assert_eq!(
        console.serving().get(&CounterId::from("k-2")).map(String::as_str),
        Some("BR-0002")
    );
    assert_eq!(console.now_serving(), None);
}

#[tokio::test]
async fn call_next_takes_lowest_trailing_sequence() {
    let backend = backend_with(json!([
        queue_entry_json("q-3", "BR-3", QueueStatus::Pending, None),
        queue_entry_json("q-1", "BR-1", QueueStatus::Pending, None),
        queue_entry_json("q-10", "BR-10", QueueStatus::Pending, None),
    ]))
    .await;
    backend.respond_empty("PUT", "/queues/update/q-1", 200).await;
    let mut console = open_console(&backend).await;

    let called = console.call_next().await.unwrap().unwrap();
    assert_eq!(called.number, "BR-1");
    assert_eq!(called.status, QueueStatus::InProgress);
    assert_eq!(called.counter.unwrap().id, CounterId::from("k-1"));

    let body = put_body(&backend, "q-1").await;
    assert_eq!(body["status"], "InProgress");
    assert_eq!(body["counterId"], "k-1");
    assert_eq!(body["branchId"], "b-1");
    assert_eq!(body["queueTypeId"], "t-1");
    assert_eq!(body["customerId"], "c-q-1");
    assert_eq!(body["completedAt"], Value::Null);

    assert_eq!(console.now_serving(), Some("BR-1"));
    assert_eq!(
        backend
            .hits("GET", "/fcmNotification/check-next-fifth")
            .await
            .len(),
        1
    );
}

#[tokio::test]
async fn call_next_with_nothing_pending_is_a_no_op() {
    let backend = backend_with(json!([queue_entry_json(
        "q-1",
        "BR-0001",
        QueueStatus::Completed,
        Some(("k-1", 1))
    )]))
    .await;
    let mut console = open_console(&backend).await;

    assert!(console.call_next().await.unwrap().is_none());
    assert!(backend.hits("PUT", "/queues/update/q-1").await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn busy_counter_refuses_call_next() {
    let backend = backend_with(json!([
        queue_entry_json("q-1", "BR-0001", QueueStatus::InProgress, Some(("k-1", 1))),
        queue_entry_json("q-2", "BR-0002", QueueStatus::Pending, None),
    ]))
    .await;
    let mut console = open_console(&backend).await;

    let err = console.call_next().await.unwrap_err();
    assert!(matches!(err, QueueDeskError::Guard(_)));
    assert_eq!(console.notice(), Some(COUNTER_BUSY));
    tokio::time::advance(Duration::from_millis(2_999)).await;
    assert_eq!(console.notice(), Some(COUNTER_BUSY));
    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(console.notice(), None);

    assert!(backend.hits("PUT", "/queues/update/q-2").await.is_empty());
    assert!(
        backend
            .hits("GET", "/fcmNotification/check-next-fifth")
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn completing_stamps_time_and_frees_counter() {
    let backend = backend_with(json!([queue_entry_json(
        "q-1",
        "BR-0001",
        QueueStatus::InProgress,
        Some(("k-1", 1))
    )]))
    .await;
    backend.respond_empty("PUT", "/queues/update/q-1", 200).await;
    let mut console = open_console(&backend).await;
    assert_eq!(console.now_serving(), Some("BR-0001"));

    console
        .update_status(&QueueId::from("q-1"), QueueStatus::Completed)
        .await
        .unwrap();

    let body = put_body(&backend, "q-1").await;
    assert_eq!(body["status"], "Completed");
    assert_eq!(body["counterId"], "k-1");
    assert!(body["completedAt"].as_str().unwrap().ends_with('Z'));

    assert!(console.serving().is_empty());
    let entry = &console.queues()[0];
    assert_eq!(entry.status, QueueStatus::Completed);
    assert!(entry.completed_at.is_some());
}

#[tokio::test]
async fn canceling_keeps_the_serving_counter() {
    let backend = backend_with(json!([queue_entry_json(
        "q-1",
        "BR-0001",
        QueueStatus::InProgress,
        Some(("k-2", 2))
    )]))
    .await;
    backend.respond_empty("PUT", "/queues/update/q-1", 200).await;
    let mut console = open_console(&backend).await;

    console
        .update_status(&QueueId::from("q-1"), QueueStatus::Canceled)
        .await
        .unwrap();

    let body = put_body(&backend, "q-1").await;
    assert_eq!(body["counterId"], "k-2");
    assert!(!console.serving().contains_key(&CounterId::from("k-2")));
    assert_eq!(
        console.queues()[0].counter.as_ref().unwrap().id,
        CounterId::from("k-2")
    );
}

#[tokio::test]
async fn failed_update_leaves_local_state_alone() {
    let backend = backend_with(json!([queue_entry_json(
        "q-1",
        "BR-0001",
        QueueStatus::Pending,
        None
    )]))
    .await;
    backend.respond_empty("PUT", "/queues/update/q-1", 500).await;
    let mut console = open_console(&backend).await;

    let err = console
        .update_status(&QueueId::from("q-1"), QueueStatus::InProgress)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), UPDATE_FAILED);
    assert_eq!(err.status(), Some(500));
    assert_eq!(console.error(), Some(UPDATE_FAILED));
    assert_eq!(console.queues()[0].status, QueueStatus::Pending);
    assert!(console.serving().is_empty());
}

#[tokio::test]
async fn load_failure_reports_banner() {
    let backend = TestBackend::start().await;
    backend.respond_empty("GET", "/counters", 503).await;
    backend.respond("GET", "/queues/branch/b-1", 200, json!([])).await;
    backend.sign_in_as(&staff_session("k-1")).await.unwrap();
    let sessions = SessionStore::new(backend.api.clone(), backend.state.clone());
    let mut console = CounterConsole::open(
        backend.api.clone(),
        sessions,
        BRANCH_ID.into(),
        &CounterConfig::default(),
    )
    .await
    .unwrap();

    let err = console.load().await.unwrap_err();
    assert_eq!(err.to_string(), LOAD_FAILED);
    assert_eq!(console.error(), Some(LOAD_FAILED));
}

#[tokio::test]
async fn sign_out_is_guarded_while_serving() {
    let backend = backend_with(json!([queue_entry_json(
        "q-1",
        "BR-0001",
        QueueStatus::InProgress,
        Some(("k-1", 1))
    )]))
    .await;
    backend.respond_empty("PUT", "/queues/update/q-1", 200).await;
    let mut console = open_console(&backend).await;

    let err = console.sign_out().await.unwrap_err();
    assert!(matches!(err, QueueDeskError::Guard(_)));
    assert_eq!(console.notice(), Some(SIGN_OUT_BLOCKED));
    assert!(backend.api.has_token());

    console
        .update_status(&QueueId::from("q-1"), QueueStatus::Completed)
        .await
        .unwrap();
    console.sign_out().await.unwrap();
    assert!(!backend.api.has_token());
    let sessions = SessionStore::new(backend.api.clone(), backend.state.clone());
    assert!(sessions.current().await.unwrap().is_none());
}

#[tokio::test]
async fn customer_of_an_entry_opens_for_editing() {
    let backend = backend_with(json!([queue_entry_json(
        "q-1",
        "BR-0001",
        QueueStatus::Pending,
        None
    )]))
    .await;
    let console = open_console(&backend).await;

    let editor = console.edit_customer(&QueueId::from("q-1")).unwrap();
    assert_eq!(editor.customer_id().as_str(), "c-q-1");
    assert_eq!(editor.record().fields.full_name, "Customer q-1");
    assert!(matches!(
        console.edit_customer(&QueueId::from("q-9")),
        Err(QueueDeskError::NotFound { .. })
    ));
}
