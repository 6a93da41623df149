//! The set of class ids a dataset's labels may use.
//!
//! By default only class `0` is valid. A multi-class dataset either lists
//! its ids explicitly or derives them from the `names` of its `data.yaml`
//! training descriptor.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::YoloCheckError;

/// File name of the training descriptor at the dataset root.
pub const DATA_YAML: &str = "data.yaml";

/// The class ids a label line may use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassSet {
    ids: BTreeSet<i64>,
}

impl Default for ClassSet {
    fn default() -> Self {
        Self::single(0)
    }
}

impl ClassSet {
    /// A set containing exactly one class id.
    pub fn single(id: i64) -> Self {
        Self {
            ids: BTreeSet::from([id]),
        }
    }

    /// Builds a set from explicit ids. Returns `None` when `ids` is empty.
    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Option<Self> {
        let ids: BTreeSet<i64> = ids.into_iter().collect();
        (!ids.is_empty()).then_some(Self { ids })
    }

    /// Ids `0..count`.
    pub fn first_n(count: usize) -> Option<Self> {
        Self::from_ids((0..count).map(|id| id as i64))
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }
}

impl fmt::Display for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.ids.iter().map(i64::to_string).collect();
        write!(f, "{{{}}}", ids.join(", "))
    }
}

#[derive(Debug, Deserialize)]
struct DataYaml {
    names: DataYamlNames,
    #[serde(default)]
    nc: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataYamlNames {
    Sequence(Vec<String>),
    Mapping(BTreeMap<usize, String>),
}

impl DataYamlNames {
    fn class_count(&self) -> usize {
        match self {
            DataYamlNames::Sequence(names) => names.len(),
            DataYamlNames::Mapping(mapping) => mapping.keys().max().map_or(0, |max| max + 1),
        }
    }
}

/// Reads a `data.yaml` descriptor and returns ids `0..names.len()`.
///
/// `names` may be a list or an index-to-name mapping; for a mapping the
/// class count is the largest index plus one. If `nc` is present it must
/// agree with that count.
pub fn read_data_yaml_classes(path: &Path) -> Result<ClassSet, YoloCheckError> {
    let data = fs::read_to_string(path).map_err(|source| YoloCheckError::DataYamlRead {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: DataYaml =
        serde_yaml::from_str(&data).map_err(|source| YoloCheckError::DataYamlParse {
            path: path.to_path_buf(),
            source,
        })?;

    let count = parsed.names.class_count();

    if let Some(nc) = parsed.nc {
        if nc != count {
            return Err(YoloCheckError::ClassSet {
                path: path.to_path_buf(),
                message: format!("nc is {nc} but names declares {count} class(es)"),
            });
        }
    }

    ClassSet::first_n(count).ok_or_else(|| YoloCheckError::ClassSet {
        path: path.to_path_buf(),
        message: "names is empty".to_string(),
    })
}
