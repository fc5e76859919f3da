//! CamRecharge Core - photo capture library
//!
//! This crate provides the platform-independent half of the CamRecharge app:
//! picking a downsample factor for a captured photo, decoding it at that
//! factor for display, encoding and storing the result, and the capture
//! session that ties these to the device's camera, share sheet and gallery.
//!
//! # Module Structure
//!
//! - `sample` - Downsample factor selection
//! - `decode` - Bounds-only, full and sampled decoding
//! - `resample` - Bounds decode → factor → sampled decode pipeline
//! - `encode` - JPEG encoding for saved photos
//! - `storage` - File naming and the `ImageStore` capability
//! - `platform` - Camera, share, gallery and notice capabilities
//! - `session` - Capture workflow state machine
//! - `config` - `CaptureConfig`
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod decode;
pub mod encode;
pub mod platform;
pub mod resample;
pub mod sample;
pub mod session;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use config::CaptureConfig;
pub use decode::{DecodeError, DecodedImage, Dimensions, FilterType};
pub use platform::{Camera, CaptureOutcome, GalleryIndex, Notice, Notifier, ShareService};
pub use resample::{resample_file, resample_pic, Resampled};
pub use sample::{compute_sample_size, round_down_to_power_of_two};
pub use session::{CaptureSession, CaptureState, SavedState, Services, SessionError};
pub use storage::{FsImageStore, ImageStore, StorageError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_compose() {
        let original = Dimensions::new(4000, 3000);
        let viewport = Dimensions::new(500, 500);
        let factor = compute_sample_size(original, viewport);

        assert_eq!(factor, 6);
        assert_eq!(round_down_to_power_of_two(factor), 4);
        assert_eq!(
            decode::sampled_dimensions(original, factor),
            Dimensions::new(667, 500)
        );
    }
}
