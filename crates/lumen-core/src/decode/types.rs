//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{BufferError, PixelBuffer};
use crate::format::UnsupportedFormat;
use crate::transform::{flip_horizontal, flip_vertical, rotate180, rotate270, rotate90};

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The requested or detected format is not handled by the codec.
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormat),

    /// No bytes were supplied.
    #[error("Empty image data")]
    Empty,

    /// The image data is corrupted or incomplete.
    #[error("Corrupted or incomplete image data: {0}")]
    Corrupted(String),

    /// The decoded raster could not form a valid pixel buffer.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Apply the EXIF orientation tag of JPEG files.
    pub apply_orientation: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            apply_orientation: true,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (rotate 90 CW + flip horizontal).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (rotate 270 CW + flip horizontal).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }

    /// Produce the upright image for a buffer stored with this orientation.
    pub fn apply(self, image: PixelBuffer) -> PixelBuffer {
        match self {
            Orientation::Normal => image,
            Orientation::FlipHorizontal => flip_horizontal(&image),
            Orientation::Rotate180 => rotate180(&image),
            Orientation::FlipVertical => flip_vertical(&image),
            Orientation::Transpose => flip_horizontal(&rotate90(&image)),
            Orientation::Rotate90CW => rotate90(&image),
            Orientation::Transverse => flip_horizontal(&rotate270(&image)),
            Orientation::Rotate270CW => rotate270(&image),
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}
