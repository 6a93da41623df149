#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A normalized box that passes every format check: centre anywhere in the
/// unit square, size at least the degenerate threshold.
pub fn arb_valid_coords() -> impl Strategy<Value = [f64; 4]> {
    (0.0f64..=1.0, 0.0f64..=1.0, 0.001f64..=1.0, 0.001f64..=1.0)
        .prop_map(|(x, y, w, h)| [x, y, w, h])
}

/// A coordinate strictly outside `[0, 1]`.
pub fn arb_out_of_range() -> impl Strategy<Value = f64> {
    prop_oneof![-100.0f64..-0.0001, 1.0001f64..100.0]
}

pub fn format_line(class_id: i64, coords: [f64; 4]) -> String {
    format!(
        "{} {} {} {} {}",
        class_id, coords[0], coords[1], coords[2], coords[3]
    )
}

/// A line whose whitespace-separated field count is not five.
pub fn arb_wrong_field_count_line() -> impl Strategy<Value = String> {
    prop_oneof![1usize..5, 6usize..12].prop_flat_map(|count| {
        prop::collection::vec(0.0f64..=1.0, count).prop_map(|values| {
            values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
    })
}
