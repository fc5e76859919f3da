//! Image encoding for saved and shared photos.
//!
//! ```ignore
//! use camrecharge_core::encode::encode_image;
//!
//! let jpeg_bytes = encode_image(&resampled.image, 100)?;
//! ```

mod jpeg;

pub use jpeg::{encode_image, encode_jpeg, EncodeError};
