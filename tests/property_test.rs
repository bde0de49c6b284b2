//! Property-based tests for value normalization and page segmentation.

use claimform::{normalize, segment};
use proptest::prelude::*;

/// Property: normalizing an already normalized value changes nothing
#[test]
fn proptest_normalize_idempotent() {
    proptest!(|(text in "\\PC{0,80}")| {
        let once = normalize(Some(text.as_str()));
        let twice = normalize(once.as_deref());
        prop_assert_eq!(once, twice);
    });
}

/// Property: normalized values never carry edge whitespace
#[test]
fn proptest_normalize_trimmed() {
    proptest!(|(text in "[ \t\n:._a-z0-9-]{0,40}")| {
        if let Some(value) = normalize(Some(text.as_str())) {
            prop_assert_eq!(value.trim(), value.as_str());
            prop_assert!(!value.contains("  "));
        }
    });
}

/// Property: N well-formed delimiters give max(1, N) pages
#[test]
fn proptest_segment_page_count() {
    proptest!(|(bodies in prop::collection::vec("[a-z ]{0,20}", 0..12))| {
        let text: String = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| format!("--- Page {} ---\n{}\n", i + 1, body))
            .collect();
        prop_assert_eq!(segment(&text).len(), bodies.len().max(1));
    });
}

/// Property: arbitrary delimiter numbers still yield strictly increasing pages
#[test]
fn proptest_segment_numbers_increase() {
    proptest!(|(numbers in prop::collection::vec(any::<u32>(), 1..8))| {
        let text: String = numbers
            .iter()
            .map(|n| format!("--- Page {} ---\nbody\n", n))
            .collect();
        let pages = segment(&text);

        prop_assert_eq!(pages.len(), numbers.len());
        prop_assert!(pages.windows(2).all(|w| w[0].number < w[1].number));
    });
}

/// Property: segmentation never panics and returns at least one page
#[test]
fn proptest_segment_never_empty() {
    proptest!(|(text in "\\PC{0,300}")| {
        prop_assert!(!segment(&text).is_empty());
    });
}
