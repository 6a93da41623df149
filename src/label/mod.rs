//! YOLO label file parsing and format checks.
//!
//! A label file holds one box per line: `<class_id> <x> <y> <w> <h>`, with
//! coordinates normalized to the image size. Parsing never aborts on a bad
//! line: every malformed line becomes a finding and the next line is read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::classes::ClassSet;
use crate::validation::{Checker, Finding, FindingCode, Location};

/// Number of whitespace-separated fields on a label line.
pub const FIELD_COUNT: usize = 5;

/// One parsed label line.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBoxRecord {
    /// 1-based line number in the label file.
    pub line: usize,
    pub class_id: i64,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBoxRecord {
    pub fn coords(&self) -> [f64; 4] {
        [self.x_center, self.y_center, self.width, self.height]
    }
}

/// The result of reading one non-blank label line.
#[derive(Clone, Debug, PartialEq)]
pub enum LineOutcome {
    Record(BoundingBoxRecord),
    Malformed(Finding),
}

/// Lazy iterator over the lines of one label file.
///
/// Blank lines are skipped but still counted, so line numbers match what an
/// editor shows. A line that is not valid UTF-8 yields one `InvalidEncoding`
/// finding and reading continues with the next line. An I/O error ends the
/// iteration after yielding one `LabelReadFailed` finding.
pub struct LabelLines<R> {
    reader: R,
    buf: Vec<u8>,
    path: PathBuf,
    line_num: usize,
    non_blank: usize,
    done: bool,
}

impl<R: BufRead> LabelLines<R> {
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            path: path.into(),
            line_num: 0,
            non_blank: 0,
            done: false,
        }
    }

    /// Number of non-blank lines seen so far.
    pub fn non_blank_lines(&self) -> usize {
        self.non_blank
    }
}

impl<R: BufRead> Iterator for LabelLines<R> {
    type Item = LineOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(source) => {
                    self.done = true;
                    return Some(LineOutcome::Malformed(Finding::error(
                        FindingCode::LabelReadFailed,
                        Checker::Labels,
                        Location::line(&self.path, self.line_num + 1),
                        format!("failed to read label file: {source}"),
                    )));
                }
            }

            self.line_num += 1;
            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line,
                Err(source) => {
                    self.non_blank += 1;
                    return Some(LineOutcome::Malformed(Finding::error(
                        FindingCode::InvalidEncoding,
                        Checker::Labels,
                        Location::line(&self.path, self.line_num),
                        format!("line is not valid UTF-8: {source}"),
                    )));
                }
            };

            if line.trim().is_empty() {
                continue;
            }
            self.non_blank += 1;

            return Some(match parse_label_line(line, &self.path, self.line_num) {
                Ok(record) => LineOutcome::Record(record),
                Err(finding) => LineOutcome::Malformed(finding),
            });
        }
    }
}

/// Parses one non-blank label line into a record.
pub fn parse_label_line(
    line: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<BoundingBoxRecord, Finding> {
    let trimmed = line.trim();
    let location = || Location::line(file_path, line_num);

    let field_count = trimmed.split_whitespace().count();
    if field_count != FIELD_COUNT {
        return Err(Finding::error(
            FindingCode::FieldCount,
            Checker::Labels,
            location(),
            format!("expected {FIELD_COUNT} values, got {field_count}"),
        ));
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    let invalid_number = |field_name: &str, raw: &str, expected: &str| {
        Finding::error(
            FindingCode::InvalidNumber,
            Checker::Labels,
            location(),
            format!(
                "invalid {field_name} '{raw}'; expected {expected} (line content: '{trimmed}')"
            ),
        )
    };

    let class_id = tokens[0]
        .parse::<i64>()
        .map_err(|_| invalid_number("class_id", tokens[0], "integer"))?;

    let mut coords = [0.0f64; 4];
    for (slot, (raw, name)) in coords
        .iter_mut()
        .zip(tokens[1..].iter().zip(["x_center", "y_center", "width", "height"]))
    {
        *slot = raw
            .parse::<f64>()
            .map_err(|_| invalid_number(name, *raw, "floating-point number"))?;
    }

    let [x_center, y_center, width, height] = coords;
    Ok(BoundingBoxRecord {
        line: line_num,
        class_id,
        x_center,
        y_center,
        width,
        height,
    })
}

/// Fuzz-only entrypoint for single-line parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_label_line(input: &str) -> Result<BoundingBoxRecord, Finding> {
    parse_label_line(input, Path::new("<fuzz>"), 1)
}

/// Limits applied to parsed records.
#[derive(Clone, Debug)]
pub struct FormatRules {
    pub classes: ClassSet,
    /// Width or height below this is reported as a degenerate box.
    pub min_box_size: f64,
}

impl Default for FormatRules {
    fn default() -> Self {
        Self {
            classes: ClassSet::default(),
            min_box_size: 0.001,
        }
    }
}

/// Checks one record against the class set, coordinate range and minimum
/// box size. Each rule is reported independently.
pub fn check_record(record: &BoundingBoxRecord, path: &Path, rules: &FormatRules) -> Vec<Finding> {
    let mut findings = Vec::new();
    let location = || Location::line(path, record.line);

    if !rules.classes.contains(record.class_id) {
        findings.push(Finding::error(
            FindingCode::InvalidClassId,
            Checker::Labels,
            location(),
            format!(
                "invalid class id {} (expected one of {})",
                record.class_id, rules.classes
            ),
        ));
    }

    let coords = record.coords();
    if !coords.iter().all(|v| (0.0..=1.0).contains(v)) {
        findings.push(Finding::error(
            FindingCode::CoordinateOutOfRange,
            Checker::Labels,
            location(),
            format!("coordinates must be between 0 and 1, found {coords:?}"),
        ));
    }

    if record.width < rules.min_box_size || record.height < rules.min_box_size {
        findings.push(Finding::warning(
            FindingCode::DegenerateBox,
            Checker::Labels,
            location(),
            format!(
                "very small bounding box ({:.4}, {:.4})",
                record.width, record.height
            ),
        ));
    }

    findings
}

/// Records and findings from one label file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedLabelFile {
    pub records: Vec<BoundingBoxRecord>,
    pub findings: Vec<Finding>,
}

/// Reads and parses a whole label file.
///
/// The file handle lives only for the duration of this call. A file with no
/// non-blank lines yields one `EmptyLabelFile` warning.
pub fn parse_label_file(path: &Path) -> ParsedLabelFile {
    let mut parsed = ParsedLabelFile::default();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(source) => {
            parsed.findings.push(Finding::error(
                FindingCode::LabelReadFailed,
                Checker::Labels,
                Location::file(path),
                format!("failed to open label file: {source}"),
            ));
            return parsed;
        }
    };

    let mut lines = LabelLines::new(BufReader::new(file), path);
    for outcome in lines.by_ref() {
        match outcome {
            LineOutcome::Record(record) => parsed.records.push(record),
            LineOutcome::Malformed(finding) => parsed.findings.push(finding),
        }
    }

    let read_failed = parsed
        .findings
        .iter()
        .any(|f| f.code == FindingCode::LabelReadFailed);
    if lines.non_blank_lines() == 0 && !read_failed {
        parsed.findings.push(Finding::warning(
            FindingCode::EmptyLabelFile,
            Checker::Labels,
            Location::file(path),
            "empty label file",
        ));
    }

    debug!(
        path = %path.display(),
        records = parsed.records.len(),
        findings = parsed.findings.len(),
        "parsed label file"
    );

    parsed
}

/// Parses a label file and runs the format checks on every record.
///
/// Returns the number of records parsed and all findings in line order.
pub fn check_label_file(path: &Path, rules: &FormatRules) -> (usize, Vec<Finding>) {
    let parsed = parse_label_file(path);
    let mut findings = parsed.findings;

    for record in &parsed.records {
        findings.extend(check_record(record, path, rules));
    }

    findings.sort_by_key(|f| f.location.line.unwrap_or(0));
    (parsed.records.len(), findings)
}
