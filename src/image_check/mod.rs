//! Image decodability and size checks.

use std::path::Path;

use image::{GenericImageView, ImageReader};
use tracing::debug;

use crate::validation::{Checker, Finding, FindingCode, Location};

/// How much of each image file is read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageCheckMode {
    /// Decode the full pixel data.
    #[default]
    Decode,
    /// Read only the header dimensions.
    Header,
}

/// Limits applied to image files.
#[derive(Clone, Debug)]
pub struct ImageRules {
    pub mode: ImageCheckMode,
    /// Width or height below this many pixels is reported.
    pub min_side: u32,
}

impl Default for ImageRules {
    fn default() -> Self {
        Self {
            mode: ImageCheckMode::Decode,
            min_side: 10,
        }
    }
}

/// Why an image could not be measured.
enum ReadFailure {
    Io(String),
    Decode(String),
}

/// Checks a single image file. Returns no findings for a usable image.
pub fn check_image(path: &Path, rules: &ImageRules) -> Vec<Finding> {
    let dims = match rules.mode {
        ImageCheckMode::Decode => decode_dimensions(path),
        ImageCheckMode::Header => header_dimensions(path),
    };

    let location = Location::file(path);
    let finding = match dims {
        Ok((width, height)) => {
            debug!(path = %path.display(), width, height, "checked image");
            if width < rules.min_side || height < rules.min_side {
                Some(Finding::warning(
                    FindingCode::ImageTooSmall,
                    Checker::Images,
                    location,
                    format!("very small image ({width}x{height})"),
                ))
            } else {
                None
            }
        }
        Err(ReadFailure::Io(cause)) => Some(Finding::error(
            FindingCode::ImageReadFailed,
            Checker::Images,
            location,
            format!("failed to read image: {cause}"),
        )),
        Err(ReadFailure::Decode(cause)) => Some(Finding::error(
            FindingCode::ImageUndecodable,
            Checker::Images,
            location,
            format!("could not decode image: {cause}"),
        )),
    };

    finding.into_iter().collect()
}

fn decode_dimensions(path: &Path) -> Result<(u32, u32), ReadFailure> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| ReadFailure::Io(source.to_string()))?;

    match reader.decode() {
        Ok(image) => Ok(image.dimensions()),
        Err(image::ImageError::IoError(source)) => Err(ReadFailure::Io(source.to_string())),
        Err(other) => Err(ReadFailure::Decode(other.to_string())),
    }
}

fn header_dimensions(path: &Path) -> Result<(u32, u32), ReadFailure> {
    let size = imagesize::size(path).map_err(|source| match source {
        imagesize::ImageError::IoError(io) => ReadFailure::Io(io.to_string()),
        other => ReadFailure::Decode(other.to_string()),
    })?;

    let width = u32::try_from(size.width).map_err(|_| {
        ReadFailure::Decode(format!("image width {} does not fit in u32", size.width))
    })?;
    let height = u32::try_from(size.height).map_err(|_| {
        ReadFailure::Decode(format!("image height {} does not fit in u32", size.height))
    })?;

    Ok((width, height))
}
