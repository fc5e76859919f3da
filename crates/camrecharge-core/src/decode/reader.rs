//! Image decoding with EXIF orientation handling.
//!
//! Camera apps hand back JPEG files, but the reader guesses the container from
//! the leading bytes so PNG input works as well.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use tracing::debug;

use super::resize::reduce_rgb;
use super::{DecodeError, DecodedImage, Dimensions, FilterType, Orientation};

fn guessed_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

/// Read the pixel dimensions of an encoded image without decoding its pixels.
///
/// Only the container header (plus EXIF, when present) is parsed. The result
/// is reported after orientation correction, so a portrait photo stored as
/// landscape with `Rotate90CW` comes back taller than wide.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the container is not recognized,
/// `DecodeError::CorruptedFile` if the header cannot be parsed, and
/// `DecodeError::InvalidDimensions` if the header reports a zero side.
pub fn read_dimensions(bytes: &[u8]) -> Result<Dimensions, DecodeError> {
    let (width, height) = guessed_reader(bytes)?
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let raw = Dimensions::new(width, height);
    if raw.is_empty() {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    let orientation = extract_orientation(bytes);
    let oriented = raw.oriented(orientation);
    debug!(%raw, %oriented, ?orientation, "Read image bounds");
    Ok(oriented)
}

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a known format.
/// Returns `DecodeError::CorruptedFile` if the image is corrupted.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    let rgb_img = apply_orientation(img, orientation).into_rgb8();
    Ok(DecodedImage::from_rgb_image(rgb_img))
}

/// Decode an image and reduce it by `factor` on both axes.
///
/// The orientation-corrected image is reduced to
/// `ceil(width / factor) x ceil(height / factor)`. A factor of 1 yields the
/// full-resolution image.
///
/// The decoded buffer is reduced before orientation is applied and dropped as
/// soon as the reduced one exists, so at most one full-resolution bitmap is
/// alive. Each axis rounds up on its own, which makes reduce-then-orient and
/// orient-then-reduce agree on the output size.
pub fn decode_sampled(
    bytes: &[u8],
    factor: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let rgb = decode_dynamic(bytes)?.into_rgb8();
    let full = Dimensions::new(rgb.width(), rgb.height()).oriented(orientation);

    let reduced = reduce_rgb(rgb, factor, filter);
    let sampled = apply_orientation(DynamicImage::ImageRgb8(reduced), orientation).into_rgb8();
    let sampled = DecodedImage::from_rgb_image(sampled);
    debug!(
        factor,
        %full,
        sampled = %sampled.dimensions(),
        ?orientation,
        "Decoded sampled image"
    );
    Ok(sampled)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    guessed_reader(bytes)?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Extract the EXIF orientation value from encoded bytes.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_jpeg;
    use crate::decode::sampled_dimensions;
    use crate::test_support::{jpeg_with_orientation, rgb_at};

    fn jpeg_fixture(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![200u8; (width * height * 3) as usize];
        encode_jpeg(&pixels, width, height, 90).unwrap()
    }

    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_read_dimensions_jpeg() {
        let bytes = jpeg_fixture(64, 48);
        assert_eq!(read_dimensions(&bytes).unwrap(), Dimensions::new(64, 48));
    }

    #[test]
    fn test_read_dimensions_png() {
        let bytes = png_fixture(7, 13);
        assert_eq!(read_dimensions(&bytes).unwrap(), Dimensions::new(7, 13));
    }

    #[test]
    fn test_read_dimensions_unknown_format() {
        let result = read_dimensions(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_read_dimensions_empty() {
        assert!(read_dimensions(&[]).is_err());
    }

    #[test]
    fn test_decode_valid_jpeg() {
        let img = decode_image(&jpeg_fixture(16, 8)).unwrap();
        assert_eq!(img.width, 16);
        assert_eq!(img.height, 8);
        assert_eq!(img.pixels.len(), 16 * 8 * 3);
    }

    #[test]
    fn test_decode_sampled_reduces() {
        let img = decode_sampled(&jpeg_fixture(40, 30), 4, FilterType::Bilinear).unwrap();
        assert_eq!(img.dimensions(), Dimensions::new(10, 8));
    }

    #[test]
    fn test_decode_sampled_factor_one_is_full_size() {
        let img = decode_sampled(&png_fixture(9, 5), 1, FilterType::Nearest).unwrap();
        assert_eq!(img.dimensions(), Dimensions::new(9, 5));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        match decode_image(&[0x00, 0x01, 0x02, 0x03]) {
            Err(DecodeError::InvalidFormat) => {}
            Err(e) => panic!("Expected InvalidFormat error, got: {:?}", e),
            Ok(_) => panic!("Expected error, got success"),
        }
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let bytes = jpeg_fixture(32, 32);
        let result = decode_image(&bytes[0..20]);
        assert!(result.is_err());
    }

    #[test]
    fn test_orientation_without_exif() {
        assert_eq!(get_orientation(&jpeg_fixture(4, 4)), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_exif_rotate90_swaps_bounds() {
        // Stored landscape, displayed portrait
        let bytes = jpeg_with_orientation(40, 20, 6);

        assert_eq!(get_orientation(&bytes), Orientation::Rotate90CW);
        assert_eq!(read_dimensions(&bytes).unwrap(), Dimensions::new(20, 40));
    }

    #[test]
    fn test_exif_rotate90_decodes_upright() {
        let img = decode_image(&jpeg_with_orientation(40, 20, 6)).unwrap();
        assert_eq!(img.dimensions(), Dimensions::new(20, 40));

        // The stored left (red) half ends up on top
        let top = rgb_at(&img.pixels, img.width, 10, 5);
        let bottom = rgb_at(&img.pixels, img.width, 10, 35);
        assert!(top[0] > 180 && top[2] < 80, "top was {top:?}");
        assert!(bottom[2] > 180 && bottom[0] < 80, "bottom was {bottom:?}");
    }

    #[test]
    fn test_exif_rotate90_sampled_matches_bounds() {
        let bytes = jpeg_with_orientation(40, 20, 6);
        let bounds = read_dimensions(&bytes).unwrap();
        let img = decode_sampled(&bytes, 2, FilterType::Bilinear).unwrap();

        assert_eq!(img.dimensions(), sampled_dimensions(bounds, 2));
        let top = rgb_at(&img.pixels, img.width, 5, 3);
        let bottom = rgb_at(&img.pixels, img.width, 5, 17);
        assert!(top[0] > 180 && top[2] < 80, "top was {top:?}");
        assert!(bottom[2] > 180 && bottom[0] < 80, "bottom was {bottom:?}");
    }

    #[test]
    fn test_exif_rotate270_odd_sides_sampled() {
        // ceil(41/4) x ceil(21/4) before orientation, swapped after
        let bytes = jpeg_with_orientation(41, 21, 8);
        let img = decode_sampled(&bytes, 4, FilterType::Nearest).unwrap();
        assert_eq!(img.dimensions(), Dimensions::new(6, 11));
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_raw(2, 1, pixels).unwrap());

        let rotated = apply_orientation(img, Orientation::Rotate90CW).into_rgb8();
        assert_eq!(rotated.dimensions(), (1, 2));
        assert_eq!(rotated.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let pixels = vec![255, 0, 0, 0, 255, 0];
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_raw(2, 1, pixels).unwrap());

        let flipped = apply_orientation(img, Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(flipped.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(flipped.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
