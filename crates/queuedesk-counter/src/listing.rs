// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filtered, sorted and paginated views over the branch queue list.

use queuedesk_core::{QueueEntry, QueueStatus, trailing_sequence};

/// What the staff asked to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// `None` shows every status.
    pub status: Option<QueueStatus>,
    /// Case-insensitive substring of the queue number.
    pub search: String,
    /// 1-based page number.
    pub page: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            status: None,
            search: String::new(),
            page: 1,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: Vec<&'a QueueEntry>,
    /// The page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    /// Entries matching the filters across all pages.
    pub total_items: usize,
}

/// Applies `query` to `entries`: filter, newest sequence first, then paginate.
///
/// Out-of-range pages are clamped to the nearest existing one. An empty
/// result reports page 1 of 0.
pub fn list<'a>(entries: &'a [QueueEntry], query: &ListingQuery, page_size: usize) -> Page<'a> {
    let needle = query.search.trim().to_lowercase();
    let mut matching: Vec<&QueueEntry> = entries
        .iter()
        .filter(|e| query.status.is_none_or(|status| e.status == status))
        .filter(|e| needle.is_empty() || e.number.to_lowercase().contains(&needle))
        .collect();
    matching.sort_by(|a, b| trailing_sequence(&b.number).cmp(&trailing_sequence(&a.number)));

    let page_size = page_size.max(1);
    let total_items = matching.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = query.page.clamp(1, total_pages.max(1));

    let items = matching
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use queuedesk_test_utils::fixtures::queue_entry_json;

    fn entry(n: u32, status: QueueStatus) -> QueueEntry {
        serde_json::from_value(queue_entry_json(
            &format!("q-{n}"),
            &format!("BR-{n:04}"),
            status,
            None,
        ))
        .unwrap()
    }

    fn numbers(page: &Page<'_>) -> Vec<String> {
        page.items.iter().map(|e| e.number.clone()).collect()
    }

    #[test]
    fn sorts_newest_first_and_paginates() {
        let entries: Vec<QueueEntry> = (1..=12).map(|n| entry(n, QueueStatus::Pending)).collect();

        let first = list(&entries, &ListingQuery::default(), 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 12);
        assert_eq!(
            numbers(&first),
            ["BR-0012", "BR-0011", "BR-0010", "BR-0009", "BR-0008"]
        );

        let last = list(
            &entries,
            &ListingQuery {
                page: 3,
                ..Default::default()
            },
            5,
        );
        assert_eq!(numbers(&last), ["BR-0002", "BR-0001"]);
    }

    #[test]
    fn filters_by_status_and_search() {
        let entries = vec![
            entry(1, QueueStatus::Completed),
            entry(2, QueueStatus::Pending),
            entry(12, QueueStatus::Pending),
            entry(21, QueueStatus::InProgress),
        ];

        let pending = list(
            &entries,
            &ListingQuery {
                status: Some(QueueStatus::Pending),
                ..Default::default()
            },
            5,
        );
        assert_eq!(numbers(&pending), ["BR-0012", "BR-0002"]);

        let search = list(
            &entries,
            &ListingQuery {
                search: "br-001".into(),
                ..Default::default()
            },
            5,
        );
        assert_eq!(numbers(&search), ["BR-0012"]);
    }

    #[test]
    fn empty_listing_reports_no_pages() {
        let page = list(&[], &ListingQuery::default(), 5);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn page_past_the_end_is_clamped() {
        let entries: Vec<QueueEntry> = (1..=6).map(|n| entry(n, QueueStatus::Pending)).collect();
        let page = list(
            &entries,
            &ListingQuery {
                page: 9,
                ..Default::default()
            },
            5,
        );
        assert_eq!(page.page, 2);
        assert_eq!(numbers(&page), ["BR-0001"]);
    }

    proptest! {
        #[test]
        fn pages_partition_the_matches(count in 0u32..40, page_size in 1usize..8) {
            let entries: Vec<QueueEntry> =
                (1..=count).map(|n| entry(n, QueueStatus::Pending)).collect();
            let first = list(&entries, &ListingQuery::default(), page_size);
            let mut seen = Vec::new();
            for page in 1..=first.total_pages {
                let query = ListingQuery { page, ..Default::default() };
                let shown = list(&entries, &query, page_size);
                prop_assert!(shown.items.len() <= page_size);
                seen.extend(shown.items.iter().map(|e| trailing_sequence(&e.number)));
            }
            prop_assert_eq!(seen.len(), count as usize);
            prop_assert!(seen.windows(2).all(|w| w[0] > w[1]));
        }
    }
}
