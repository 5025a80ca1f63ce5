// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One snapshot of the public display.

use futures::future::join_all;
use queuedesk_api::ApiClient;
use queuedesk_core::{
    BranchId, Counter, CounterId, QueueDeskError, QueueStatus, format_queue_number,
    trailing_sequence,
};
use tracing::warn;

/// Shown for a counter whose now-serving lookup failed or came back empty.
pub const NO_NUMBER: &str = "0000";
pub const LOAD_FAILED: &str = "Failed to load counter data";

/// Which counters the display shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayScope {
    AllCounters,
    Counter(CounterId),
}

impl DisplayScope {
    fn includes(&self, counter: &Counter) -> bool {
        match self {
            DisplayScope::AllCounters => true,
            DisplayScope::Counter(id) => &counter.id == id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    pub counter: Counter,
    /// Display-formatted number, `0000` when unknown.
    pub now_serving: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pub rows: Vec<BoardRow>,
    /// Next pending numbers, lowest sequence first, display-formatted.
    pub next: Vec<String>,
}

/// Fetches counters, their now-serving numbers and the pending queue.
///
/// A failed now-serving lookup only blanks that counter. A failed counter
/// or queue listing fails the whole snapshot.
pub async fn fetch_board(
    api: &ApiClient,
    branch: &BranchId,
    scope: &DisplayScope,
    next_count: usize,
) -> Result<Board, QueueDeskError> {
    let counters: Vec<Counter> = api
        .counters_by_branch(branch)
        .await?
        .into_iter()
        .filter(|c| scope.includes(c))
        .collect();

    let serving = join_all(counters.iter().map(|c| api.now_serving(&c.id))).await;
    let rows = counters
        .into_iter()
        .zip(serving)
        .map(|(counter, number)| {
            let number = match number {
                Ok(number) => number.unwrap_or_else(|| NO_NUMBER.to_string()),
                Err(e) => {
                    warn!(counter_id = %counter.id, error = %e, "now-serving lookup failed");
                    NO_NUMBER.to_string()
                }
            };
            BoardRow {
                counter,
                now_serving: format_queue_number(Some(&number)),
            }
        })
        .collect();

    let queues = api.queues_by_branch(branch).await?;
    let pending = queues
        .iter()
        .filter(|q| q.status == QueueStatus::Pending)
        .map(|q| q.number.as_str());
    Ok(Board {
        rows,
        next: next_numbers(pending, next_count),
    })
}

/// The first `count` numbers by trailing sequence, formatted for display.
pub fn next_numbers<'a>(pending: impl Iterator<Item = &'a str>, count: usize) -> Vec<String> {
    let mut pending: Vec<&str> = pending.collect();
    pending.sort_by_key(|n| trailing_sequence(n));
    pending
        .into_iter()
        .take(count)
        .map(|n| format_queue_number(Some(n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuedesk_test_utils::TestBackend;
    use queuedesk_test_utils::fixtures::{counter_json, queue_entry_json};
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    fn next_numbers_sort_and_truncate() {
        let pending = ["BR-0012", "BR-0003", "BR-0100", "BR-0007"];
        assert_eq!(
            next_numbers(pending.into_iter(), 3),
            ["0003", "0007", "0012"]
        );
        assert!(next_numbers(std::iter::empty(), 10).is_empty());
    }

    #[traced_test]
    #[tokio::test]
    async fn failed_counter_lookup_shows_placeholder() {
        let backend = TestBackend::start().await;
        backend
            .respond(
                "GET",
                "/counters/by-branch/b-1",
                200,
                json!([counter_json("k-1", "Counter 1", 1), counter_json("k-2", "Counter 2", 2)]),
            )
            .await;
        backend
            .respond("GET", "/queues/now-serving/counter/k-1", 200, json!("BR-0004"))
            .await;
        backend
            .respond_empty("GET", "/queues/now-serving/counter/k-2", 500)
            .await;
        backend
            .respond(
                "GET",
                "/queues/branch/b-1",
                200,
                json!([queue_entry_json("q-5", "BR-0005", QueueStatus::Pending, None)]),
            )
            .await;

        let board = fetch_board(&backend.api, &"b-1".into(), &DisplayScope::AllCounters, 10)
            .await
            .unwrap();
        assert_eq!(board.rows[0].now_serving, "0004");
        assert_eq!(board.rows[1].now_serving, NO_NUMBER);
        assert_eq!(board.next, ["0005"]);
        assert!(logs_contain("now-serving lookup failed"));
    }
}
