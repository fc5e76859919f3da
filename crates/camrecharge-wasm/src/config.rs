//! Configuration bindings.

use camrecharge_core::CaptureConfig;
use wasm_bindgen::prelude::*;

use crate::to_js_error;

/// The default `CaptureConfig` as a plain object.
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&CaptureConfig::default()).map_err(to_js_error)
}

/// Parse an optional partial config object; `undefined`/`null` give defaults.
pub(crate) fn config_from_js(value: JsValue) -> Result<CaptureConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CaptureConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid capture config: {}", e)))
}
