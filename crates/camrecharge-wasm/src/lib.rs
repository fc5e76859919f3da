//! CamRecharge WASM - WebAssembly bindings for the capture core
//!
//! The host shell (a web view inside the mobile app) owns the camera, the
//! file system and the share sheet. It calls into this crate for everything
//! that is pure computation on photo bytes.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `resample` - Downsample factor selection and the resample pipeline
//! - `decode` - Bounds-only, full and sampled decoding, resize
//! - `encode` - JPEG encoding for saving and sharing
//! - `storage` - Capture and save file names
//! - `config` - `CaptureConfig` defaults and parsing
//!
//! # Usage
//!
//! ```typescript
//! import init, { resample_image } from '@camrecharge/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await Filesystem.readFile({ path: tempPath }));
//! const result = resample_image(bytes, view.clientWidth, view.clientHeight);
//! const preview = result.image();
//! ```

use wasm_bindgen::prelude::*;

mod config;
mod decode;
mod encode;
mod resample;
mod storage;
mod types;

pub use config::default_config;
pub use decode::{
    decode_image, decode_sampled, downsample, get_orientation, read_dimensions, resize,
    resize_to_fit,
};
pub use encode::{encode_jpeg, encode_jpeg_from_image};
pub use resample::{
    compute_sample_size, resample_image, round_down_to_power_of_two, JsResampled,
};
pub use storage::{saved_image_file_name, temp_image_prefix};
pub use types::JsDecodedImage;

/// Convert any displayable error into a JS string error.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "camrecharge-wasm {} ready",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
