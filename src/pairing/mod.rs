//! Image/label pairing per split.
//!
//! Every image in `images/<split>` should have a label file with the same
//! stem in `labels/<split>`, and vice versa. Unpaired files are reported as
//! warnings. Only top-level files of each split directory take part.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::layout::{collect_files_shallow, stem, DatasetLayout, FileKind, Split};
use crate::validation::{Checker, Finding, FindingCode, Location};

/// Pairing result for one split.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplitPairing {
    pub image_stems: BTreeSet<String>,
    pub label_stems: BTreeSet<String>,
    /// Stems with an image but no label file.
    pub missing_labels: BTreeSet<String>,
    /// Stems with a label file but no image.
    pub missing_images: BTreeSet<String>,
}

impl SplitPairing {
    /// Compares the two stem sets.
    pub fn from_stems(image_stems: BTreeSet<String>, label_stems: BTreeSet<String>) -> Self {
        let missing_labels = image_stems.difference(&label_stems).cloned().collect();
        let missing_images = label_stems.difference(&image_stems).cloned().collect();
        Self {
            image_stems,
            label_stems,
            missing_labels,
            missing_images,
        }
    }

    /// Number of stems present on both sides.
    pub fn paired(&self) -> usize {
        self.image_stems.intersection(&self.label_stems).count()
    }
}

/// Checks image/label pairing for one split.
pub fn check_split(layout: &DatasetLayout, split: Split) -> (SplitPairing, Vec<Finding>) {
    let images_dir = layout.images_split_dir(split);
    let labels_dir = layout.labels_split_dir(split);

    let mut findings = Vec::new();
    let image_stems = collect_stems(&images_dir, FileKind::Image, &mut findings);
    let label_stems = collect_stems(&labels_dir, FileKind::Label, &mut findings);

    let pairing = SplitPairing::from_stems(image_stems, label_stems);

    for stem in &pairing.missing_labels {
        findings.push(Finding::warning(
            FindingCode::MissingLabel,
            Checker::Pairing,
            Location::file(&images_dir),
            format!("{split}: image '{stem}' has no label file"),
        ));
    }

    for stem in &pairing.missing_images {
        findings.push(Finding::warning(
            FindingCode::MissingImage,
            Checker::Pairing,
            Location::file(&labels_dir),
            format!("{split}: label file '{stem}' has no image"),
        ));
    }

    debug!(
        %split,
        images = pairing.image_stems.len(),
        labels = pairing.label_stems.len(),
        missing_labels = pairing.missing_labels.len(),
        missing_images = pairing.missing_images.len(),
        "checked pairing"
    );

    (pairing, findings)
}

/// Collects stems of the files directly inside `dir`, warning about stems
/// shared by more than one file.
fn collect_stems(dir: &Path, kind: FileKind, findings: &mut Vec<Finding>) -> BTreeSet<String> {
    let scan = collect_files_shallow(dir, kind, Checker::Pairing);
    findings.extend(scan.findings);

    let mut by_stem: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for path in scan.files {
        if let Some(stem) = stem(&path) {
            by_stem.entry(stem).or_default().push(path);
        }
    }

    for (stem, paths) in &by_stem {
        if paths.len() > 1 {
            let names: Vec<String> = paths
                .iter()
                .filter_map(|p| p.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect();
            findings.push(Finding::warning(
                FindingCode::DuplicateStem,
                Checker::Pairing,
                Location::file(dir),
                format!("stem '{stem}' is shared by {}", names.join(", ")),
            ));
        }
    }

    by_stem.into_keys().collect()
}
