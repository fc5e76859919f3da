//! Image decoding for captured photos.
//!
//! This module provides functionality for:
//! - Bounds-only decoding (dimensions without pixel data)
//! - Full decoding with EXIF orientation correction
//! - Sampled decoding that honors an integer downsample factor
//! - Image resizing for on-screen previews
//!
//! All operations are synchronous and run to completion on the calling thread.
//!
//! # Examples
//!
//! ```ignore
//! use camrecharge_core::decode::{read_dimensions, decode_sampled, FilterType};
//!
//! let bytes = std::fs::read("JPEG_20240101_120000_1.jpg")?;
//! let bounds = read_dimensions(&bytes)?;
//! let preview = decode_sampled(&bytes, 4, FilterType::Bilinear)?;
//! println!("{} decoded as {}x{}", bounds, preview.width, preview.height);
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, decode_sampled, get_orientation, read_dimensions};
pub use resize::{downsample, resize, resize_to_fit, sampled_dimensions};
pub use types::{DecodeError, DecodedImage, Dimensions, FilterType, Orientation};
