//! Downsample selection and resampling bindings.
//!
//! ```typescript
//! const result = resample_image(bytes, window.innerWidth, window.innerHeight);
//! console.log(`factor ${result.factor}, preview ${result.image().width}px wide`);
//! ```

use crate::config::config_from_js;
use crate::to_js_error;
use crate::types::JsDecodedImage;
use camrecharge_core::decode::Dimensions;
use camrecharge_core::{resample, sample};
use wasm_bindgen::prelude::*;

/// Downsample factor for decoding `original` into `target`. Always >= 1.
#[wasm_bindgen]
pub fn compute_sample_size(
    original_width: u32,
    original_height: u32,
    target_width: u32,
    target_height: u32,
) -> u32 {
    sample::compute_sample_size(
        Dimensions::new(original_width, original_height),
        Dimensions::new(target_width, target_height),
    )
}

/// Round a factor down to the nearest power of two (minimum 1).
#[wasm_bindgen]
pub fn round_down_to_power_of_two(factor: u32) -> u32 {
    sample::round_down_to_power_of_two(factor)
}

/// A photo decoded for a viewport.
#[wasm_bindgen]
pub struct JsResampled {
    inner: resample::Resampled,
}

#[wasm_bindgen]
impl JsResampled {
    #[wasm_bindgen(getter)]
    pub fn factor(&self) -> u32 {
        self.inner.factor
    }

    #[wasm_bindgen(getter)]
    pub fn original_width(&self) -> u32 {
        self.inner.original.width
    }

    #[wasm_bindgen(getter)]
    pub fn original_height(&self) -> u32 {
        self.inner.original.height
    }

    /// The reduced image (a copy).
    pub fn image(&self) -> JsDecodedImage {
        JsDecodedImage::from_decoded(self.inner.image.clone())
    }
}

/// Bounds decode, pick the factor, and decode at that factor.
///
/// `config` is an optional partial `CaptureConfig` object; only `filter` and
/// `power_of_two_sampling` matter here.
#[wasm_bindgen]
pub fn resample_image(
    bytes: &[u8],
    viewport_width: u32,
    viewport_height: u32,
    config: JsValue,
) -> Result<JsResampled, JsValue> {
    let config = config_from_js(config)?;
    resample::resample_pic(
        bytes,
        Dimensions::new(viewport_width, viewport_height),
        &config,
    )
    .map(|inner| JsResampled { inner })
    .map_err(to_js_error)
}
