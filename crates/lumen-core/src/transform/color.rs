//! Per-pixel color transforms: grayscale conversion and inversion.

use crate::buffer::{PixelBuffer, PixelFormat};
use crate::luminance::luma_u8;

/// Convert an image to 8-bit gray using BT.709 luma weights.
///
/// The result is always `Gray8`. A buffer that is already gray is returned
/// as an identical copy, so the operation is idempotent.
pub fn grayscale(image: &PixelBuffer) -> PixelBuffer {
    match image.format() {
        PixelFormat::Gray8 => image.clone(),
        PixelFormat::Rgb24 => {
            let gray: Vec<u8> = image
                .as_bytes()
                .chunks_exact(3)
                .map(|px| luma_u8(px[0], px[1], px[2]))
                .collect();
            PixelBuffer::from_parts(image.width(), image.height(), PixelFormat::Gray8, gray)
        }
    }
}

/// Invert every channel (`c' = 255 - c`), keeping the format.
///
/// Each sample is a single 8-bit channel, so inversion always applies to the
/// isolated channel value and never to a packed word.
pub fn invert_colors(image: &PixelBuffer) -> PixelBuffer {
    let inverted: Vec<u8> = image.as_bytes().iter().map(|&c| 255 - c).collect();
    PixelBuffer::from_parts(image.width(), image.height(), image.format(), inverted)
}
