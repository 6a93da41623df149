//! yolocheck: an integrity checker for YOLO-format datasets.
//!
//! A YOLO dataset root holds `images/{train,val}` and `labels/{train,val}`.
//! yolocheck verifies that the two trees pair up, that every label line is a
//! well-formed normalized box of a known class, and that every image
//! decodes, before the dataset is handed to a training run.
//!
//! # Modules
//!
//! - [`layout`]: Dataset directory layout and file collection
//! - [`label`]: Label file parsing and per-box format checks
//! - [`pairing`]: Image/label pairing per split
//! - [`image_check`]: Image decoding and size checks
//! - [`classes`]: The set of valid class ids
//! - [`validation`]: The validation run and its report
//! - [`error`]: Error types for yolocheck operations

pub mod classes;
pub mod error;
pub mod image_check;
pub mod label;
pub mod layout;
pub mod logging;
pub mod pairing;
pub mod validation;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

pub use error::YoloCheckError;

use classes::{read_data_yaml_classes, ClassSet, DATA_YAML};
use image_check::{ImageCheckMode, ImageRules};
use label::FormatRules;
use validation::{DatasetSummary, Finding, ValidateOptions, ValidationReport};

/// The yolocheck CLI application.
#[derive(Parser)]
#[command(name = "yolocheck")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate a YOLO dataset directory for errors and warnings.
    Validate(ValidateArgs),
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Dataset root containing images/{train,val} and labels/{train,val}.
    #[arg(default_value = "weapons-1", env = "YOLOCHECK_DATASET")]
    root: PathBuf,

    /// Valid class id (repeatable). Defaults to 0 only.
    #[arg(long = "class-id", conflicts_with = "data_yaml")]
    class_ids: Vec<i64>,

    /// Take valid class ids from a data.yaml `names` list
    /// (defaults to <ROOT>/data.yaml when given without a path).
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    data_yaml: Option<Option<PathBuf>>,

    /// How images are checked ('decode' or 'header').
    #[arg(long, default_value = "decode")]
    image_mode: String,

    /// Boxes narrower or shorter than this (normalized) are reported.
    #[arg(long, default_value_t = 0.001)]
    min_box_size: f64,

    /// Images narrower or shorter than this many pixels are reported.
    #[arg(long, default_value_t = 10)]
    min_image_side: u32,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the yolocheck CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), YoloCheckError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        None => {
            println!("yolocheck {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Integrity checker for YOLO-format datasets.");
            println!();
            println!("Run 'yolocheck --help' for usage information.");
            Ok(())
        }
    }
}

/// JSON shape of a validation report.
#[derive(Serialize)]
struct JsonReport<'a> {
    error_count: usize,
    warning_count: usize,
    summary: &'a DatasetSummary,
    findings: &'a [Finding],
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), YoloCheckError> {
    let opts = build_options(&args)?;
    let report = validation::validate_dataset(&args.root, &opts);

    match args.output.as_str() {
        "json" => {
            let json = JsonReport {
                error_count: report.error_count(),
                warning_count: report.warning_count(),
                summary: &report.summary,
                findings: &report.findings,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        "text" => print!("{}", report),
        other => {
            return Err(YoloCheckError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    exit_status(report, args.strict)
}

/// Resolve CLI arguments into library options.
fn build_options(args: &ValidateArgs) -> Result<ValidateOptions, YoloCheckError> {
    let classes = match (&args.data_yaml, args.class_ids.is_empty()) {
        (Some(path), _) => {
            let path = path.clone().unwrap_or_else(|| args.root.join(DATA_YAML));
            read_data_yaml_classes(&path)?
        }
        (None, false) => ClassSet::from_ids(args.class_ids.iter().copied()).unwrap_or_default(),
        (None, true) => ClassSet::default(),
    };

    if !(args.min_box_size.is_finite() && args.min_box_size >= 0.0) {
        return Err(YoloCheckError::InvalidOption {
            message: format!(
                "--min-box-size must be a non-negative number, got {}",
                args.min_box_size
            ),
        });
    }

    let mode = match args.image_mode.as_str() {
        "decode" => ImageCheckMode::Decode,
        "header" => ImageCheckMode::Header,
        other => {
            return Err(YoloCheckError::InvalidOption {
                message: format!("--image-mode '{}' (supported: decode, header)", other),
            });
        }
    };

    Ok(ValidateOptions {
        format: FormatRules {
            classes,
            min_box_size: args.min_box_size,
        },
        images: ImageRules {
            mode,
            min_side: args.min_image_side,
        },
    })
}

/// Determine exit status from the report.
fn exit_status(report: ValidationReport, strict: bool) -> Result<(), YoloCheckError> {
    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (strict && has_warnings) {
        Err(YoloCheckError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}
