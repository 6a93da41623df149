//! Fuzz target for whole label files.
//!
//! Arbitrary bytes (including invalid UTF-8) are iterated line by line and
//! every parsed record is run through the format checks.

#![no_main]

use std::io::Cursor;
use std::path::Path;

use libfuzzer_sys::fuzz_target;
use yolocheck::label::{check_record, FormatRules, LabelLines, LineOutcome};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let rules = FormatRules::default();
    for outcome in LabelLines::new(Cursor::new(data), "<fuzz>") {
        if let LineOutcome::Record(record) = outcome {
            let _ = check_record(&record, Path::new("<fuzz>"), &rules);
        }
    }
});
