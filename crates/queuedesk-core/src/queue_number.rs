// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queue-number parsing and display formatting.
//!
//! Queue numbers are branch-prefixed and hyphen-delimited (`BR-0007`). The
//! numeric suffix after the last hyphen is the trailing sequence number used
//! for every ordering decision in the client.

use std::cmp::Ordering;

/// Placeholder shown when there is no queue number.
pub const EMPTY_NUMBER: &str = "-";

/// Digits the sequence part is left-padded to for display.
const DISPLAY_WIDTH: usize = 4;

/// Extracts the trailing sequence number of a queue number.
///
/// Takes the segment after the last hyphen (the whole string when there is
/// none) and reads its leading digits. Missing or non-numeric segments give 0.
pub fn trailing_sequence(queue_number: &str) -> u64 {
    let segment = queue_number.rsplit('-').next().unwrap_or_default();
    let digits: String = segment
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Orders two queue numbers by trailing sequence, lowest first.
pub fn by_sequence(a: &str, b: &str) -> Ordering {
    trailing_sequence(a).cmp(&trailing_sequence(b))
}

/// Formats a queue number for display.
///
/// `BR-0007` and `BR-07` both render as `0007`. A number without a hyphen is
/// returned unchanged and a missing number renders as `-`.
pub fn format_queue_number(queue_number: Option<&str>) -> String {
    let Some(number) = queue_number.filter(|n| !n.is_empty()) else {
        return EMPTY_NUMBER.to_string();
    };

    match number.rsplit_once('-') {
        Some((_, sequence)) => format!("{sequence:0>width$}", width = DISPLAY_WIDTH),
        None => number.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_padded_sequence() {
        assert_eq!(format_queue_number(Some("BR-0007")), "0007");
        assert_eq!(format_queue_number(Some("BR-07")), "0007");
        assert_eq!(format_queue_number(Some("KL-MAIN-12")), "0012");
        assert_eq!(format_queue_number(Some("BR-12345")), "12345");
    }

    #[test]
    fn formats_unhyphenated_and_missing_numbers() {
        assert_eq!(format_queue_number(Some("0042")), "0042");
        assert_eq!(format_queue_number(Some("walk-in")), "00in");
        assert_eq!(format_queue_number(None), "-");
        assert_eq!(format_queue_number(Some("")), "-");
    }

    #[test]
    fn trailing_sequence_reads_last_segment() {
        assert_eq!(trailing_sequence("Q-3"), 3);
        assert_eq!(trailing_sequence("Q-10"), 10);
        assert_eq!(trailing_sequence("BR-2-0011"), 11);
        assert_eq!(trailing_sequence("0042"), 42);
    }

    #[test]
    fn trailing_sequence_defaults_to_zero() {
        assert_eq!(trailing_sequence("Q-"), 0);
        assert_eq!(trailing_sequence("Q-abc"), 0);
        assert_eq!(trailing_sequence(""), 0);
        assert_eq!(trailing_sequence("Q-12b"), 12);
    }

    #[test]
    fn ordering_is_numeric_not_lexicographic() {
        let mut numbers = vec!["Q-3", "Q-1", "Q-10"];
        numbers.sort_by(|a, b| by_sequence(a, b));
        assert_eq!(numbers, ["Q-1", "Q-3", "Q-10"]);
    }

    proptest! {
        #[test]
        fn formatted_number_keeps_sequence(prefix in "[A-Z]{1,4}", seq in 0u64..100_000) {
            let number = format!("{prefix}-{seq}");
            let formatted = format_queue_number(Some(&number));
            prop_assert!(formatted.len() >= 4);
            prop_assert_eq!(trailing_sequence(&formatted), seq);
        }
    }
}
