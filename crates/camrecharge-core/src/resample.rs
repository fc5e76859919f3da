//! Resample a captured photo for display.
//!
//! The pipeline is: bounds-only decode, pick a downsample factor for the
//! viewport, then decode at that factor. The factor is always applied to the
//! final decode. The full-resolution bitmap exists only inside
//! `decode::decode_sampled` and is dropped once the reduced one is built.

use std::path::Path;

use tracing::{debug, info};

use crate::config::CaptureConfig;
use crate::decode::{self, DecodeError, DecodedImage, Dimensions};
use crate::sample::{compute_sample_size, round_down_to_power_of_two};

/// A photo decoded for a particular viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled {
    /// The reduced image.
    pub image: DecodedImage,
    /// Factor the image was reduced by.
    pub factor: u32,
    /// Oriented dimensions of the source before reduction.
    pub original: Dimensions,
}

/// Pick the factor `config` would decode `original` at for `viewport`.
pub fn select_factor(original: Dimensions, viewport: Dimensions, config: &CaptureConfig) -> u32 {
    let factor = compute_sample_size(original, viewport);
    if config.power_of_two_sampling {
        round_down_to_power_of_two(factor)
    } else {
        factor
    }
}

/// Resample encoded image bytes to fit `viewport`.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for an empty viewport. Any failure
/// to read the bounds is returned before the selector runs.
pub fn resample_pic(
    bytes: &[u8],
    viewport: Dimensions,
    config: &CaptureConfig,
) -> Result<Resampled, DecodeError> {
    if viewport.is_empty() {
        return Err(DecodeError::InvalidDimensions {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let original = decode::read_dimensions(bytes)?;
    let factor = select_factor(original, viewport, config);
    debug!(%original, %viewport, factor, "Selected downsample factor");

    let image = decode::decode_sampled(bytes, factor, config.filter)?;
    Ok(Resampled {
        image,
        factor,
        original,
    })
}

/// Read `path` and resample it to fit `viewport`.
pub fn resample_file(
    path: &Path,
    viewport: Dimensions,
    config: &CaptureConfig,
) -> Result<Resampled, DecodeError> {
    let bytes = std::fs::read(path)?;
    let resampled = resample_pic(&bytes, viewport, config)?;
    info!(
        path = %path.display(),
        original = %resampled.original,
        decoded = %resampled.image.dimensions(),
        "Resampled photo"
    );
    Ok(resampled)
}
