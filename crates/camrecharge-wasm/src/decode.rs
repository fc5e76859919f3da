//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { read_dimensions, decode_image, resize_to_fit } from '@camrecharge/wasm';
//!
//! const bytes = new Uint8Array(await photo.arrayBuffer());
//! const { width, height } = read_dimensions(bytes);
//! const image = decode_image(bytes);
//! const fitted = resize_to_fit(image, canvas.width, canvas.height, 1);
//! ```

use crate::types::{filter_from_u8, JsDecodedImage};
use crate::to_js_error;
use camrecharge_core::decode::{self, Dimensions};
use wasm_bindgen::prelude::*;

/// Read `{ width, height }` from the image header without decoding pixels.
///
/// Dimensions are reported after EXIF orientation correction.
#[wasm_bindgen]
pub fn read_dimensions(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let dims = decode::read_dimensions(bytes).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&dims).map_err(to_js_error)
}

/// Decode an image at full resolution with EXIF orientation applied.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

/// Decode an image reduced by `factor` on both axes.
#[wasm_bindgen]
pub fn decode_sampled(bytes: &[u8], factor: u32, filter: u8) -> Result<JsDecodedImage, JsValue> {
    decode::decode_sampled(bytes, factor, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

/// EXIF orientation (1-8) of an encoded image; 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

/// Reduce an already decoded image by `factor` on both axes.
///
/// Takes ownership of `image`; the JS handle is consumed. A factor of 0 or 1
/// hands back the same pixels.
#[wasm_bindgen]
pub fn downsample(
    image: JsDecodedImage,
    factor: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::downsample(image.into_decoded(), factor, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

/// Resize an image to exact dimensions.
///
/// `filter`: 0=Nearest, 1=Bilinear (default), 2=Lanczos3.
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(image.as_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

/// Resize an image to fit a viewport, preserving aspect ratio. Never upscales.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    viewport_width: u32,
    viewport_height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize_to_fit(
        image.as_decoded(),
        Dimensions::new(viewport_width, viewport_height),
        filter_from_u8(filter),
    )
    .map(JsDecodedImage::from_decoded)
    .map_err(to_js_error)
}
