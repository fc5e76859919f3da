//! Image resizing for preview display.
//!
//! `resize` and `resize_to_fit` read the source through a borrowed view and
//! allocate only the output. `downsample` takes the image by value so the
//! factor-1 case hands the same buffer back.

use image::RgbImage;

use super::{DecodeError, DecodedImage, Dimensions, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target side is zero.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image.as_rgb_view().ok_or_else(pixel_buffer_mismatch)?;
    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Resize an image to fit within a viewport while preserving aspect ratio.
///
/// Images that already fit are returned unchanged; this never upscales.
pub fn resize_to_fit(
    image: &DecodedImage,
    viewport: Dimensions,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if viewport.is_empty() {
        return Err(DecodeError::InvalidDimensions {
            width: viewport.width,
            height: viewport.height,
        });
    }

    if image.dimensions().fits_within(viewport) {
        return Ok(image.clone());
    }

    let fitted = calculate_fit_dimensions(image.dimensions(), viewport);
    resize(image, fitted.width, fitted.height, filter)
}

/// Reduce an image by an integer factor on both axes.
///
/// The output is `ceil(width / factor) x ceil(height / factor)`, matching the
/// way platform decoders round partial blocks. A factor of 0 or 1 returns the
/// image as is, buffer included.
///
/// `FilterType::Bilinear` reduces with a single-pass area average
/// (`imageops::thumbnail`), which allocates nothing but the output. The other
/// filters go through `imageops::resize`.
pub fn downsample(
    image: DecodedImage,
    factor: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if factor <= 1 {
        return Ok(image);
    }
    let rgb = image.into_rgb_image().ok_or_else(pixel_buffer_mismatch)?;
    Ok(DecodedImage::from_rgb_image(reduce_rgb(rgb, factor, filter)))
}

/// Reduce an RGB buffer by `factor`. The source is dropped once the smaller
/// buffer exists; a factor of 0 or 1 returns it untouched.
pub(super) fn reduce_rgb(rgb: RgbImage, factor: u32, filter: FilterType) -> RgbImage {
    if factor <= 1 {
        return rgb;
    }
    let (width, height) = rgb.dimensions();
    let target = sampled_dimensions(Dimensions::new(width, height), factor);
    match filter {
        FilterType::Bilinear => image::imageops::thumbnail(&rgb, target.width, target.height),
        other => {
            image::imageops::resize(&rgb, target.width, target.height, other.to_image_filter())
        }
    }
}

fn pixel_buffer_mismatch() -> DecodeError {
    DecodeError::CorruptedFile("Pixel buffer does not match dimensions".to_string())
}

/// Dimensions produced by decoding `dims` at `1/factor` linear scale.
pub fn sampled_dimensions(dims: Dimensions, factor: u32) -> Dimensions {
    let factor = factor.max(1);
    Dimensions::new(
        dims.width.div_ceil(factor).max(1),
        dims.height.div_ceil(factor).max(1),
    )
}

/// Largest size with the source aspect ratio that fits inside `viewport`.
fn calculate_fit_dimensions(src: Dimensions, viewport: Dimensions) -> Dimensions {
    if src.is_empty() {
        return Dimensions::default();
    }

    let scale = f64::min(
        viewport.width as f64 / src.width as f64,
        viewport.height as f64 / src.height as f64,
    );

    Dimensions::new(
        ((src.width as f64 * scale).round() as u32).clamp(1, viewport.width),
        ((src.height as f64 * scale).round() as u32).clamp(1, viewport.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.dimensions(), Dimensions::new(50, 25));
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_to_fit_landscape_into_portrait_screen() {
        let img = create_test_image(400, 300);
        let fitted = resize_to_fit(&img, Dimensions::new(108, 192), FilterType::Nearest).unwrap();

        assert_eq!(fitted.dimensions(), Dimensions::new(108, 81));
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let img = create_test_image(300, 400);
        let fitted = resize_to_fit(&img, Dimensions::new(200, 200), FilterType::Bilinear).unwrap();

        assert_eq!(fitted.dimensions(), Dimensions::new(150, 200));
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let img = create_test_image(100, 50);
        let fitted = resize_to_fit(&img, Dimensions::new(256, 256), FilterType::Bilinear).unwrap();
        assert_eq!(fitted.dimensions(), Dimensions::new(100, 50));
    }

    #[test]
    fn test_resize_to_fit_empty_viewport_error() {
        let img = create_test_image(100, 50);
        assert!(resize_to_fit(&img, Dimensions::new(0, 10), FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_downsample_halves() {
        let img = create_test_image(64, 48);
        let half = downsample(img, 2, FilterType::Bilinear).unwrap();
        assert_eq!(half.dimensions(), Dimensions::new(32, 24));
    }

    #[test]
    fn test_downsample_rounds_up_partial_blocks() {
        let img = create_test_image(65, 49);
        let out = downsample(img, 4, FilterType::Nearest).unwrap();
        assert_eq!(out.dimensions(), Dimensions::new(17, 13));
    }

    #[test]
    fn test_downsample_factor_one_is_identity() {
        let img = create_test_image(10, 10);
        assert_eq!(downsample(img.clone(), 1, FilterType::Bilinear).unwrap(), img);
        assert_eq!(downsample(img.clone(), 0, FilterType::Bilinear).unwrap(), img);
    }

    #[test]
    fn test_downsample_factor_one_reuses_buffer() {
        let img = create_test_image(32, 32);
        let ptr = img.pixels.as_ptr();

        let out = downsample(img, 1, FilterType::Lanczos3).unwrap();
        assert_eq!(out.pixels.as_ptr(), ptr);
        assert_eq!(out.dimensions(), Dimensions::new(32, 32));
    }

    #[test]
    fn test_downsample_averages_blocks() {
        // 2x2 blocks of 0 and 200 average to 100
        let pixels = vec![0, 0, 0, 200, 200, 200, 200, 200, 200, 0, 0, 0];
        let img = DecodedImage::new(2, 2, pixels);

        let out = downsample(img, 2, FilterType::Bilinear).unwrap();
        assert_eq!(out.dimensions(), Dimensions::new(1, 1));
        assert_eq!(out.pixels, vec![100, 100, 100]);
    }

    #[test]
    fn test_downsample_every_filter_hits_sampled_size() {
        for filter in [FilterType::Nearest, FilterType::Bilinear, FilterType::Lanczos3] {
            let out = downsample(create_test_image(100, 75), 6, filter).unwrap();
            assert_eq!(out.dimensions(), Dimensions::new(17, 13));
        }
    }

    #[test]
    fn test_resize_leaves_source_untouched() {
        let img = create_test_image(20, 10);
        let before = img.clone();
        resize(&img, 5, 5, FilterType::Lanczos3).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_sampled_dimensions() {
        assert_eq!(
            sampled_dimensions(Dimensions::new(4000, 3000), 6),
            Dimensions::new(667, 500)
        );
        assert_eq!(
            sampled_dimensions(Dimensions::new(3, 3), 8),
            Dimensions::new(1, 1)
        );
    }

    #[test]
    fn test_calculate_fit_dimensions() {
        assert_eq!(
            calculate_fit_dimensions(Dimensions::new(6000, 4000), Dimensions::new(2560, 2560)),
            Dimensions::new(2560, 1707)
        );
        assert_eq!(
            calculate_fit_dimensions(Dimensions::new(4000, 6000), Dimensions::new(2560, 2560)),
            Dimensions::new(1707, 2560)
        );
        assert_eq!(
            calculate_fit_dimensions(Dimensions::new(0, 0), Dimensions::new(256, 256)),
            Dimensions::new(0, 0)
        );
    }
}
