//! Image encoding WASM bindings.
//!
//! ```typescript
//! const jpeg = encode_jpeg_from_image(preview, 100);
//! await Filesystem.writeFile({ path, data: jpeg });
//! ```

use crate::to_js_error;
use crate::types::JsDecodedImage;
use camrecharge_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes. `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(to_js_error)
}

/// Encode a JsDecodedImage to JPEG bytes.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_image(image.as_decoded(), quality).map_err(to_js_error)
}
