//! Validation report types for structured finding reporting.
//!
//! This module provides rich, structured validation results that can be
//! displayed to users, serialized as JSON, or processed programmatically.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::layout::Split;

/// The result of validating a dataset directory.
///
/// Contains all findings in the order they were discovered, plus summary
/// counts of what was scanned.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// All findings produced during validation.
    pub findings: Vec<Finding>,
    /// Counts of the files and boxes that were scanned.
    pub summary: DatasetSummary,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a finding to the report.
    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Appends findings from a single checker, preserving their order.
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Returns the number of errors in the report, fatal findings included.
    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| matches!(f.severity, Severity::Error | Severity::Fatal))
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    /// Returns the fatal finding that aborted the run, if any.
    pub fn fatal(&self) -> Option<&Finding> {
        self.findings
            .iter()
            .find(|f| f.severity == Severity::Fatal)
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no findings at all.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Returns true if validation passed in strict mode (no errors or warnings).
    pub fn is_ok_strict(&self) -> bool {
        self.findings.is_empty()
    }

    /// Iterates over the findings produced by one checker.
    pub fn findings_by_checker(&self, checker: Checker) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.checker == checker)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary)?;

        if self.findings.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;

        for checker in Checker::ALL {
            let mut group = self.findings_by_checker(checker).peekable();
            if group.peek().is_none() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "{}:", checker.title())?;
            for finding in group {
                writeln!(f, "  {}", finding)?;
            }
        }

        Ok(())
    }
}

/// A single validation finding.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Finding {
    /// The severity of the finding.
    pub severity: Severity,

    /// A stable code for the finding type.
    pub code: FindingCode,

    /// The checker that produced the finding.
    pub checker: Checker,

    /// Where the finding occurred.
    pub location: Location,

    /// A human-readable description of the finding.
    pub message: String,
}

impl Finding {
    /// Creates a new finding.
    pub fn new(
        severity: Severity,
        code: FindingCode,
        checker: Checker,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            checker,
            location,
            message: message.into(),
        }
    }

    /// Creates a new error.
    pub fn error(
        code: FindingCode,
        checker: Checker,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, code, checker, location, message)
    }

    /// Creates a new warning.
    pub fn warning(
        code: FindingCode,
        checker: Checker,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, code, checker, location, message)
    }

    /// Creates a fatal finding that aborts the run.
    pub fn fatal(
        code: FindingCode,
        checker: Checker,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Fatal, code, checker, location, message)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.location, self.message
        )
    }
}

/// The severity of a finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suspicious but usable data; does not fail a non-strict run.
    Warning,
    /// Invalid or corrupt data; the run continues.
    Error,
    /// The dataset layout is unusable; the run stopped immediately.
    Fatal,
}

/// A stable code identifying the type of finding.
///
/// These codes can be used for filtering, ignoring specific findings,
/// or programmatic handling of validation results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FindingCode {
    // Layout
    /// A required split directory does not exist.
    MissingDirectory,
    /// A directory could not be traversed.
    TraversalFailed,

    // Pairing
    /// An image has no label file with the same stem.
    MissingLabel,
    /// A label file has no image with the same stem.
    MissingImage,
    /// Two files in one split share a stem.
    DuplicateStem,

    // Labels
    /// A label file could not be opened or read.
    LabelReadFailed,
    /// A label file contains no boxes.
    EmptyLabelFile,
    /// A label line is not valid UTF-8.
    InvalidEncoding,
    /// A label line does not have exactly five fields.
    FieldCount,
    /// A label field is not a valid number.
    InvalidNumber,
    /// A class id outside the configured class set.
    InvalidClassId,
    /// A normalized coordinate outside `[0, 1]`.
    CoordinateOutOfRange,
    /// A box too thin or too short to be useful.
    DegenerateBox,

    // Images
    /// An image file could not be decoded.
    ImageUndecodable,
    /// An image file could not be read from disk.
    ImageReadFailed,
    /// An image smaller than the minimum side length.
    ImageTooSmall,
}

/// The checker that produced a finding. Used to group report output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Checker {
    Layout,
    Pairing,
    Labels,
    Images,
}

impl Checker {
    /// All checkers in the order they run.
    pub const ALL: [Checker; 4] = [
        Checker::Layout,
        Checker::Pairing,
        Checker::Labels,
        Checker::Images,
    ];

    fn title(self) -> &'static str {
        match self {
            Checker::Layout => "Dataset layout",
            Checker::Pairing => "Image-label pairs",
            Checker::Labels => "Label formats",
            Checker::Images => "Images",
        }
    }
}

/// Where a finding occurred: a file or directory, optionally a line in it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: PathBuf,
    /// 1-based line number, for findings inside label files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Location {
    /// A location covering a whole file or directory.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            line: None,
        }
    }

    /// A location pointing at one line of a file.
    pub fn line(path: impl AsRef<Path>, line: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            line: Some(line),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path.display(), line),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// Summary counts for a validation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Per-split pairing counts, in split order.
    pub splits: Vec<SplitSummary>,
    /// Label files parsed (recursive under `labels/`).
    pub label_files: usize,
    /// Boxes that parsed into records.
    pub boxes: usize,
    /// Image files checked (recursive under `images/`).
    pub images: usize,
}

/// Pairing counts for one split.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SplitSummary {
    pub split: Split,
    pub images: usize,
    pub labels: usize,
    /// Stems present in both images and labels.
    pub paired: usize,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scanned {} image(s), {} label file(s), {} box(es)",
            self.images, self.label_files, self.boxes
        )?;
        for split in &self.splits {
            write!(
                f,
                "\n  {}: {} image(s), {} label(s), {} paired",
                split.split, split.images, split.labels, split.paired
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning() -> Finding {
        Finding::warning(
            FindingCode::EmptyLabelFile,
            Checker::Labels,
            Location::file("labels/train/a.txt"),
            "empty label file",
        )
    }

    fn error() -> Finding {
        Finding::error(
            FindingCode::FieldCount,
            Checker::Labels,
            Location::line("labels/train/b.txt", 3),
            "expected 5 values, got 4",
        )
    }

    #[test]
    fn counts_fatal_as_error() {
        let mut report = ValidationReport::new();
        report.add(warning());
        report.add(Finding::fatal(
            FindingCode::MissingDirectory,
            Checker::Layout,
            Location::file("root/images/train"),
            "missing directory",
        ));

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(!report.is_ok());
        assert!(report.fatal().is_some());
    }

    #[test]
    fn warnings_only_is_ok_but_not_strict() {
        let mut report = ValidationReport::new();
        report.add(warning());
        assert!(report.is_ok());
        assert!(!report.is_ok_strict());
    }

    #[test]
    fn display_groups_by_checker() {
        let mut report = ValidationReport::new();
        report.add(error());
        report.add(Finding::warning(
            FindingCode::MissingLabel,
            Checker::Pairing,
            Location::file("images/train"),
            "image 'x' has no label",
        ));

        let text = report.to_string();
        let pairing = text.find("Image-label pairs:").expect("pairing header");
        let labels = text.find("Label formats:").expect("labels header");
        assert!(pairing < labels);
        assert!(text.contains("[ERROR] FieldCount in labels/train/b.txt:3"));
    }

    #[test]
    fn json_uses_lowercase_severity_and_omits_missing_line() {
        let json = serde_json::to_value(warning()).expect("serialize finding");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["checker"], "labels");
        assert_eq!(json["code"], "EmptyLabelFile");
        assert!(json["location"].get("line").is_none());
    }
}
