// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A queue entry's life across intake, counter and display, plus a smoke
//! run of the binary against the same mock backend.

use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

use queuedesk_config::model::CounterConfig;
use queuedesk_core::{CustomerType, QueueStatus, Tier};
use queuedesk_counter::CounterConsole;
use queuedesk_display::{DisplayScope, fetch_board};
use queuedesk_intake::{IdentifyOutcome, IntakeSession, ResultScreen, Step, StepFlow, TierOption};
use queuedesk_push::PushRegistrar;
use queuedesk_state::SessionStore;
use queuedesk_test_utils::fixtures::{BRANCH_ID, counter_json, customer_json, queue_entry_json};
use queuedesk_test_utils::{FixedTokenSource, TestBackend, staff_session};
use serde_json::{Value, json};

const ID_NUMBER: &str = "900412-14-5566";

async fn mount_branch(backend: &TestBackend) {
    let counters = json!([
        counter_json("k-1", "Counter 1", 1),
        counter_json("k-2", "Counter 2", 2),
    ]);
    backend.respond("GET", "/counters", 200, counters.clone()).await;
    backend
        .respond("GET", &format!("/counters/by-branch/{BRANCH_ID}"), 200, counters)
        .await;
}

#[tokio::test]
async fn registered_customer_is_called_and_shown_on_the_board() {
    let backend = TestBackend::start().await;
    mount_branch(&backend).await;
    backend
        .respond(
            "GET",
            &format!("/customer/by-id-number/{ID_NUMBER}"),
            200,
            customer_json("c-q-7", ID_NUMBER, "Customer q-7"),
        )
        .await;
    backend
        .respond_empty("PUT", "/customer/customerFcmToken/c-q-7", 200)
        .await;
    backend
        .respond(
            "POST",
            "/queues/create",
            200,
            queue_entry_json("q-7", "BR-0007", QueueStatus::Pending, None),
        )
        .await;

    // Intake: a returning customer is queued straight from identification.
    let push = PushRegistrar::new(
        backend.api.clone(),
        Arc::new(FixedTokenSource::new(Some("fcm-1"))),
        true,
    );
    let mut session = IntakeSession::new();
    session.set_branch_id(BRANCH_ID.into());
    let mut flow = StepFlow::new(backend.api.clone(), push, session, Duration::ZERO);
    flow.select_tier(&TierOption {
        tier: Tier::Basic,
        queue_type_id: "t-1".into(),
        name: "Basic Tier".into(),
        description: String::new(),
    })
    .unwrap();
    flow.choose_customer_type(CustomerType::ForSelf).unwrap();

    let IdentifyOutcome::Queued(ticket) = flow.identify(ID_NUMBER, None).await.unwrap() else {
        panic!("expected the returning customer to be queued");
    };
    assert_eq!(flow.step(), Step::Result);
    let screen = ResultScreen::new(&ticket, "Customer q-7", "0001", 5);
    assert_eq!(screen.display_number(), "0007");
    assert_eq!(backend.hits("PUT", "/customer/customerFcmToken/c-q-7").await.len(), 1);

    // Counter: the new entry is the only one waiting.
    backend
        .respond(
            "GET",
            &format!("/queues/branch/{BRANCH_ID}"),
            200,
            json!([
                queue_entry_json("q-3", "BR-0003", QueueStatus::Completed, Some(("k-2", 2))),
                queue_entry_json("q-7", "BR-0007", QueueStatus::Pending, None),
            ]),
        )
        .await;
    backend
        .respond_empty("GET", "/fcmNotification/check-next-fifth", 200)
        .await;
    backend.respond_empty("PUT", "/queues/update/q-7", 200).await;

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

    let called = console.call_next().await.unwrap().unwrap();
    assert_eq!(called.number, "BR-0007");
    assert_eq!(console.now_serving(), Some("BR-0007"));

    let update = backend.hits("PUT", "/queues/update/q-7").await;
    assert_eq!(update.len(), 1);
    let body: Value = serde_json::from_slice(&update[0].body).unwrap();
    assert_eq!(body["status"], "InProgress");
    assert_eq!(body["counterId"], "k-1");
    assert_eq!(body["customerId"], "c-q-7");

    // Display: the backend now reports the called number at counter 1.
    backend
        .respond("GET", "/queues/now-serving/counter/k-1", 200, json!("BR-0007"))
        .await;
    backend
        .respond_empty("GET", "/queues/now-serving/counter/k-2", 404)
        .await;
    let board = fetch_board(&backend.api, &BRANCH_ID.into(), &DisplayScope::AllCounters, 10)
        .await
        .unwrap();
    let rows: Vec<(&str, &str)> = board
        .rows
        .iter()
        .map(|r| (r.counter.name.as_str(), r.now_serving.as_str()))
        .collect();
    assert_eq!(rows, [("Counter 1", "0007"), ("Counter 2", "0000")]);
}

#[tokio::test(flavor = "multi_thread")]
async fn binary_lists_counters_of_the_configured_branch() {
    let backend = TestBackend::start().await;
    backend
        .respond(
            "GET",
            "/counters/by-branch/b-9",
            200,
            json!([
                counter_json("k-2", "Counter 2", 2),
                counter_json("k-1", "Counter 1", 1),
            ]),
        )
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("queuedesk.toml");
    std::fs::write(
        &config_path,
        format!(
            "[backend]\nbase_url = \"{}/\"\n\n[branch]\ndefault_branch_id = \"b-9\"\n",
            backend.server.uri()
        ),
    )
    .unwrap();

    let output = tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_queuedesk"))
            .arg("--config")
            .arg(&config_path)
            .arg("--ephemeral")
            .args(["counters", "--json"])
            .output()
    })
    .await
    .unwrap()
    .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let counters: Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = counters
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["counterId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["k-1", "k-2"]);
}

#[test]
fn binary_rejects_an_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("queuedesk.toml");
    std::fs::write(&config_path, "[display]\npoll_interval_secs = 0\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_queuedesk"))
        .arg("--config")
        .arg(&config_path)
        .args(["--ephemeral", "counters"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}
