use std::fs;

use proptest::prelude::*;
use yolocheck::label::{check_label_file, FormatRules};
use yolocheck::validation::{FindingCode, Severity};

mod proptest_helpers;

use proptest_helpers::{
    arb_out_of_range, arb_valid_coords, arb_wrong_field_count_line, format_line,
};

fn check_contents(contents: &str) -> (usize, Vec<yolocheck::validation::Finding>) {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("sample.txt");
    fs::write(&path, contents).expect("write label file");
    check_label_file(&path, &FormatRules::default())
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn well_formed_files_have_no_errors(
        boxes in prop::collection::vec(arb_valid_coords(), 1..20)
    ) {
        let contents: String = boxes
            .iter()
            .map(|coords| format_line(0, *coords) + "\n")
            .collect();

        let (records, findings) = check_contents(&contents);
        prop_assert_eq!(records, boxes.len());
        prop_assert!(
            findings.iter().all(|f| f.severity != Severity::Error),
            "unexpected errors: {:?}", findings
        );
    }

    #[test]
    fn each_wrong_field_count_line_is_one_error(
        bad in prop::collection::vec(arb_wrong_field_count_line(), 1..8),
        good in arb_valid_coords(),
    ) {
        let mut contents = String::new();
        for line in &bad {
            contents.push_str(line);
            contents.push('\n');
        }
        contents.push_str(&format_line(0, good));
        contents.push('\n');

        let (records, findings) = check_contents(&contents);
        let field_errors: Vec<_> = findings
            .iter()
            .filter(|f| f.code == FindingCode::FieldCount)
            .collect();

        prop_assert_eq!(field_errors.len(), bad.len());
        prop_assert!(field_errors.iter().all(|f| f.severity == Severity::Error));
        // The trailing valid line is still parsed.
        prop_assert_eq!(records, 1);
    }

    #[test]
    fn out_of_range_values_are_named(
        coords in arb_valid_coords(),
        index in 0usize..4,
        value in arb_out_of_range(),
    ) {
        let mut coords = coords;
        coords[index] = value;

        let (_, findings) = check_contents(&format_line(0, coords));
        let range = findings
            .iter()
            .find(|f| f.code == FindingCode::CoordinateOutOfRange);

        prop_assert!(range.is_some(), "no range error in {:?}", findings);
        let message = &range.unwrap().message;
        prop_assert!(message.contains(&format!("{:?}", value)), "{}", message);
    }
}
