//! Resizing to exact dimensions.
//!
//! Nearest-neighbor sampling is implemented directly so that results are
//! exact and reproducible; the smoothing filters delegate to the `image`
//! crate's resamplers. All functions return new buffers without modifying
//! the input.

use serde::{Deserialize, Serialize};

use crate::buffer::{BufferError, PixelBuffer, PixelFormat};

/// Filter type for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor: each output pixel copies one source pixel.
    #[default]
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    Bilinear,
    /// Lanczos3 interpolation (sharpest, slowest).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `BufferError::InvalidDimensions` if `width` or `height` is zero,
/// and `BufferError::TooLarge` if the output cannot be allocated.
pub fn resize(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, BufferError> {
    PixelBuffer::byte_len(width, height, image.format())?;

    // Fast path: same dimensions is the identity under every filter
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    match filter {
        FilterType::Nearest => resize_nearest(image, width, height),
        FilterType::Bilinear | FilterType::Lanczos3 => {
            let resized = image
                .to_dynamic_image()
                .resize_exact(width, height, filter.to_image_filter());
            match image.format() {
                PixelFormat::Rgb24 => PixelBuffer::from_rgb_image(resized.into_rgb8()),
                PixelFormat::Gray8 => PixelBuffer::from_gray_image(resized.into_luma8()),
            }
        }
    }
}

/// Map a destination index to the source index whose pixel centre is
/// nearest to the destination pixel centre.
///
/// `src = floor((dst + 0.5) * src_len / dst_len)`, evaluated in integers.
#[inline]
fn nearest_index(dst: u32, src_len: u32, dst_len: u32) -> usize {
    ((2 * dst as u128 + 1) * src_len as u128 / (2 * dst_len as u128)) as usize
}

fn resize_nearest(
    image: &PixelBuffer,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, BufferError> {
    let c = image.format().channels();
    let (src_w, src_h) = image.dimensions();
    let src = image.as_bytes();

    let mut output = PixelBuffer::alloc_samples(width, height, image.format())?;
    let columns: Vec<usize> = (0..width).map(|x| nearest_index(x, src_w, width)).collect();

    for y in 0..height {
        let row = nearest_index(y, src_h, height) * src_w as usize;
        for &sx in &columns {
            let idx = (row + sx) * c;
            output.extend_from_slice(&src[idx..idx + c]);
        }
    }

    Ok(PixelBuffer::from_parts(width, height, image.format(), output))
}
