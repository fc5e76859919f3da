//! Capture configuration.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;

/// Default album directory for saved photos.
pub const DEFAULT_ALBUM_NAME: &str = "CamRecharge";

/// Default JPEG quality for saved photos.
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Settings shared by the resampler, the image store and the capture session.
///
/// Missing fields deserialize to their defaults, so hosts may pass a partial
/// object (e.g. `{ "jpeg_quality": 90 }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// JPEG quality (1-100) used when saving the resampled photo.
    pub jpeg_quality: u8,
    /// Filter used when reducing the decoded photo by the downsample factor.
    pub filter: FilterType,
    /// Round the downsample factor down to a power of two before decoding.
    pub power_of_two_sampling: bool,
    /// Sub-directory of the pictures directory that saved photos go into.
    pub album_name: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            filter: FilterType::default(),
            power_of_two_sampling: false,
            album_name: DEFAULT_ALBUM_NAME.to_string(),
        }
    }
}

impl CaptureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// JPEG quality clamped to the encoder's valid range.
    pub fn effective_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}
