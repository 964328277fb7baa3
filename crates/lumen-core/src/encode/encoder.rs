//! Encoding with the `image` crate's PNG, JPEG and BMP encoders.

use std::io::Cursor;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{PixelBuffer, PixelFormat};
use crate::format::{ImageFormat, UnsupportedFormat};

/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The requested format is not handled by the codec.
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormat),

    /// The underlying encoder failed.
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: ImageFormat, reason: String },
}

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// JPEG quality (1-100, where 100 is highest quality). Out of range
    /// values are clamped.
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Encode a pixel buffer into the given container format.
///
/// `Gray8` buffers are written as 8-bit luma, `Rgb24` as 8-bit RGB.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 60-90: Good quality, recommended for most uses
/// * Below 60: Low quality, visible artifacts
pub fn encode(
    image: &PixelBuffer,
    format: ImageFormat,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    let color = match image.format() {
        PixelFormat::Rgb24 => ExtendedColorType::Rgb8,
        PixelFormat::Gray8 => ExtendedColorType::L8,
    };
    let pixels = image.as_bytes();

    let mut buffer = Cursor::new(Vec::new());

    let result = match format {
        ImageFormat::Png => PngEncoder::new(&mut buffer).write_image(pixels, width, height, color),
        ImageFormat::Jpeg => {
            let quality = options.jpeg_quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut buffer, quality)
                .write_image(pixels, width, height, color)
        }
        ImageFormat::Bmp => BmpEncoder::new(&mut buffer).write_image(pixels, width, height, color),
    };

    result.map_err(|e| EncodeError::EncodingFailed {
        format,
        reason: e.to_string(),
    })?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
