//! YOLO dataset directory layout.
//!
//! A dataset root holds `images/<split>` and `labels/<split>` trees. This
//! module names those directories and collects the files inside them.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::validation::{Checker, Finding, FindingCode, Location};

/// Image extensions recognized by every checker, matched case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];
/// Extension of YOLO label files.
pub const LABEL_EXTENSION: &str = "txt";

const IMAGES_DIR: &str = "images";
const LABELS_DIR: &str = "labels";

/// A named partition of the dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
}

impl Split {
    /// Both splits, in the order they are validated.
    pub const ALL: [Split; 2] = [Split::Train, Split::Val];

    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paths of a dataset rooted at one directory.
#[derive(Clone, Debug)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    pub fn labels_dir(&self) -> PathBuf {
        self.root.join(LABELS_DIR)
    }

    pub fn images_split_dir(&self, split: Split) -> PathBuf {
        self.images_dir().join(split.as_str())
    }

    pub fn labels_split_dir(&self, split: Split) -> PathBuf {
        self.labels_dir().join(split.as_str())
    }

    /// The four directories that must exist before validation runs,
    /// split by split.
    pub fn required_dirs(&self) -> Vec<PathBuf> {
        Split::ALL
            .iter()
            .flat_map(|&split| [self.images_split_dir(split), self.labels_split_dir(split)])
            .collect()
    }

    /// Returns the first required directory that does not exist.
    pub fn first_missing_dir(&self) -> Option<PathBuf> {
        self.required_dirs().into_iter().find(|dir| !dir.is_dir())
    }
}

/// Files collected from a directory, plus any traversal failures.
#[derive(Debug, Default)]
pub struct FileScan {
    /// Matching files, sorted by path.
    pub files: Vec<PathBuf>,
    /// One finding per directory entry that could not be read.
    pub findings: Vec<Finding>,
}

/// The kinds of file the checkers collect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    /// Any of [`IMAGE_EXTENSIONS`], ignoring case.
    Image,
    /// Exactly `.txt`; `.TXT` files are not labels.
    Label,
}

impl FileKind {
    /// Returns true if `path` has this kind's extension.
    pub fn matches(self, path: &Path) -> bool {
        match self {
            FileKind::Image => has_extension(path, &IMAGE_EXTENSIONS),
            FileKind::Label => path.extension().is_some_and(|ext| ext == LABEL_EXTENSION),
        }
    }
}

/// Recursively collect files of `kind` under `root`.
pub fn collect_files_recursive(root: &Path, kind: FileKind, checker: Checker) -> FileScan {
    scan(WalkDir::new(root).follow_links(true), root, kind, checker)
}

/// Collect the files of `kind` directly inside `dir`.
pub fn collect_files_shallow(dir: &Path, kind: FileKind, checker: Checker) -> FileScan {
    scan(
        WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true),
        dir,
        kind,
        checker,
    )
}

fn scan(walker: WalkDir, root: &Path, kind: FileKind, checker: Checker) -> FileScan {
    let mut out = FileScan::default();

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && kind.matches(entry.path()) {
                    out.files.push(entry.path().to_path_buf());
                }
            }
            Err(source) => {
                let path = source.path().unwrap_or(root).to_path_buf();
                out.findings.push(Finding::error(
                    FindingCode::TraversalFailed,
                    checker,
                    Location::file(&path),
                    format!("failed while traversing directory: {source}"),
                ));
            }
        }
    }

    out.files.sort();
    out
}

/// Returns true if the path's extension is one of `allowed`, ignoring case.
pub fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    allowed
        .iter()
        .any(|allowed_ext| ext.eq_ignore_ascii_case(allowed_ext))
}

/// The file name without its extension, used to pair images with labels.
pub fn stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}
