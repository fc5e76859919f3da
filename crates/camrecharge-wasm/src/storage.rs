//! File naming bindings.
//!
//! The host owns the file system; these only produce the names it should use.

use camrecharge_core::storage;
use chrono::{DateTime, NaiveDateTime, Utc};
use wasm_bindgen::prelude::*;

/// Wall-clock time for `epoch_ms` given JS `getTimezoneOffset()` minutes.
fn wall_clock(epoch_ms: i64, timezone_offset_minutes: i64) -> NaiveDateTime {
    // getTimezoneOffset is positive west of UTC
    let local_ms = epoch_ms - timezone_offset_minutes * 60_000;
    DateTime::<Utc>::from_timestamp_millis(local_ms)
        .unwrap_or_default()
        .naive_utc()
}

/// Local time for `epoch_ms`, or for now when not given.
fn local_timestamp(epoch_ms: Option<f64>) -> NaiveDateTime {
    let millis = epoch_ms.unwrap_or_else(js_sys::Date::now);
    let offset = js_sys::Date::new(&JsValue::from_f64(millis)).get_timezone_offset();
    wall_clock(millis as i64, offset as i64)
}

/// Prefix for a temporary capture file, e.g. `JPEG_20240131_093005_`.
#[wasm_bindgen]
pub fn temp_image_prefix(epoch_ms: Option<f64>) -> String {
    storage::temp_image_prefix(local_timestamp(epoch_ms))
}

/// File name for a saved photo, e.g. `JPEG_20240131_093005.jpg`.
#[wasm_bindgen]
pub fn saved_image_file_name(epoch_ms: Option<f64>) -> String {
    storage::saved_image_file_name(local_timestamp(epoch_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-31T09:30:05Z
    const EPOCH_MS: i64 = 1_706_693_405_000;

    #[test]
    fn test_wall_clock_utc() {
        let ts = wall_clock(EPOCH_MS, 0);
        assert_eq!(storage::saved_image_file_name(ts), "JPEG_20240131_093005.jpg");
    }

    #[test]
    fn test_wall_clock_applies_js_offset() {
        // UTC+2 reports getTimezoneOffset() == -120
        let ts = wall_clock(EPOCH_MS, -120);
        assert_eq!(storage::temp_image_prefix(ts), "JPEG_20240131_113005_");
    }
}
