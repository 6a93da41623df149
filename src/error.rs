use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for yolocheck operations.
///
/// Problems found *inside* a dataset are reported as findings in a
/// [`ValidationReport`]; this type covers failures of the run itself.
#[derive(Debug, Error)]
pub enum YoloCheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read data.yaml at {path}: {source}")]
    DataYamlRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse data.yaml at {path}: {source}")]
    DataYamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid class set in {path}: {message}")]
    ClassSet { path: PathBuf, message: String },

    #[error("Invalid option: {message}")]
    InvalidOption { message: String },

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Failed to serialize report as JSON: {0}")]
    ReportJson(#[from] serde_json::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
