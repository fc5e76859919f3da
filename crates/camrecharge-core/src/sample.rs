//! Downsample factor selection.
//!
//! Given the bounds of a captured photo and the viewport it will be shown in,
//! pick the integer factor the decoder should reduce by. The factor is the
//! smaller of the two per-axis floor ratios, so the decoded bitmap still covers
//! the viewport on both axes and only the display layer scales it further.
//!
//! Images smaller than the viewport are never upscaled: the factor clamps to 1.

use crate::decode::Dimensions;

/// Compute the downsample factor for decoding `original` into `target`.
///
/// `factor = max(1, min(original.width / target.width, original.height / target.height))`
/// using integer (floor) division. A zero target side is treated as 1.
///
/// # Example
///
/// ```ignore
/// let factor = compute_sample_size(Dimensions::new(4000, 3000), Dimensions::new(500, 500));
/// assert_eq!(factor, 6);
/// ```
pub fn compute_sample_size(original: Dimensions, target: Dimensions) -> u32 {
    let width_ratio = original.width / target.width.max(1);
    let height_ratio = original.height / target.height.max(1);
    width_ratio.min(height_ratio).max(1)
}

/// Round a factor down to the nearest power of two (minimum 1).
///
/// Some decoders only reduce by powers of two; rounding down keeps the result
/// at least as large as the unrounded factor would give.
pub fn round_down_to_power_of_two(factor: u32) -> u32 {
    match factor {
        0 | 1 => 1,
        n => 1 << (u32::BITS - 1 - n.leading_zeros()),
    }
}
