//! Dataset validation for yolocheck.
//!
//! A run checks, in order:
//! - Layout: the four split directories exist (fatal if not)
//! - Pairing: every image has a label file and vice versa, per split
//! - Labels: every label line is well-formed and in range
//! - Images: every image decodes and is not tiny

mod report;

pub use report::{
    Checker, DatasetSummary, Finding, FindingCode, Location, Severity, SplitSummary,
    ValidationReport,
};

use std::path::Path;

use tracing::{info, warn};

use crate::image_check::{check_image, ImageRules};
use crate::label::{check_label_file, FormatRules};
use crate::layout::{collect_files_recursive, DatasetLayout, FileKind, Split};
use crate::pairing::check_split;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// Rules for label lines.
    pub format: FormatRules,
    /// Rules for image files.
    pub images: ImageRules,
}

/// Validates the dataset rooted at `root` and returns every finding.
///
/// Per-file problems never abort the run. The only early exit is a missing
/// split directory, which yields a report with a single fatal finding.
/// File lists are sorted, so an unchanged dataset always produces the same
/// report.
pub fn validate_dataset(root: &Path, opts: &ValidateOptions) -> ValidationReport {
    let layout = DatasetLayout::new(root);
    let mut report = ValidationReport::new();

    if let Some(missing) = layout.first_missing_dir() {
        warn!(path = %missing.display(), "missing required directory");
        report.add(Finding::fatal(
            FindingCode::MissingDirectory,
            Checker::Layout,
            Location::file(&missing),
            format!("missing directory {}", missing.display()),
        ));
        return report;
    }

    validate_pairs(&layout, &mut report);
    validate_labels(&layout, &opts.format, &mut report);
    validate_images(&layout, &opts.images, &mut report);

    info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validation finished"
    );

    report
}

/// Validates image/label pairing for every split.
fn validate_pairs(layout: &DatasetLayout, report: &mut ValidationReport) {
    info!(root = %layout.root().display(), "validating image-label pairs");

    for split in Split::ALL {
        let (pairing, findings) = check_split(layout, split);
        report.summary.splits.push(SplitSummary {
            split,
            images: pairing.image_stems.len(),
            labels: pairing.label_stems.len(),
            paired: pairing.paired(),
        });
        report.extend(findings);
    }
}

/// Validates the format of every label file under `labels/`.
fn validate_labels(layout: &DatasetLayout, rules: &FormatRules, report: &mut ValidationReport) {
    let labels_dir = layout.labels_dir();
    info!(path = %labels_dir.display(), "validating label formats");

    let scan = collect_files_recursive(&labels_dir, FileKind::Label, Checker::Labels);
    report.extend(scan.findings);

    for label_path in &scan.files {
        let (records, findings) = check_label_file(label_path, rules);
        report.summary.label_files += 1;
        report.summary.boxes += records;
        report.extend(findings);
    }
}

/// Validates every image file under `images/`.
fn validate_images(layout: &DatasetLayout, rules: &ImageRules, report: &mut ValidationReport) {
    let images_dir = layout.images_dir();
    info!(path = %images_dir.display(), mode = ?rules.mode, "validating images");

    let scan = collect_files_recursive(&images_dir, FileKind::Image, Checker::Images);
    report.extend(scan.findings);

    for image_path in &scan.files {
        report.summary.images += 1;
        report.extend(check_image(image_path, rules));
    }
}
