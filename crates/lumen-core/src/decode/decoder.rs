//! Byte stream to pixel buffer decoding, with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use log::debug;

use super::{DecodeError, DecodeOptions, Orientation};
use crate::buffer::PixelBuffer;
use crate::format::ImageFormat;

/// Decode an image of a known format with default options.
///
/// # Errors
///
/// Returns `DecodeError::Empty` for empty input and `DecodeError::Corrupted`
/// if the bytes are not a valid image of `format`.
pub fn decode(bytes: &[u8], format: ImageFormat) -> Result<PixelBuffer, DecodeError> {
    decode_with(bytes, format, &DecodeOptions::default())
}

/// Decode an image of a known format.
///
/// Luma sources become `Gray8` buffers, everything else `Rgb24`. Alpha is
/// discarded. JPEG orientation is corrected when
/// `options.apply_orientation` is set.
pub fn decode_with(
    bytes: &[u8],
    format: ImageFormat,
    options: &DecodeOptions,
) -> Result<PixelBuffer, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let img = image::load_from_memory_with_format(bytes, format.to_image_format())
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    let buffer = into_pixel_buffer(img)?;

    if format == ImageFormat::Jpeg && options.apply_orientation {
        let orientation = extract_orientation(bytes);
        if orientation != Orientation::Normal {
            debug!(
                "Applying EXIF orientation {:?} to {}x{} (swaps dimensions: {})",
                orientation,
                buffer.width(),
                buffer.height(),
                orientation.swaps_dimensions()
            );
        }
        return Ok(orientation.apply(buffer));
    }
    Ok(buffer)
}

/// Decode an image whose format is sniffed from its leading bytes.
pub fn decode_guessed(bytes: &[u8], options: &DecodeOptions) -> Result<PixelBuffer, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    let guessed = image::guess_format(bytes).map_err(|e| DecodeError::Corrupted(e.to_string()))?;
    decode_with(bytes, ImageFormat::from_image_format(guessed)?, options)
}

fn into_pixel_buffer(img: DynamicImage) -> Result<PixelBuffer, DecodeError> {
    let buffer = if img.color().has_color() {
        PixelBuffer::from_rgb_image(img.into_rgb8())?
    } else {
        PixelBuffer::from_gray_image(img.into_luma8())?
    };
    Ok(buffer)
}

/// Extract EXIF orientation from JPEG bytes.
///
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

/// Extract EXIF orientation value from JPEG bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}
