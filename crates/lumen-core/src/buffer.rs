//! The pixel buffer: an immutable 2D grid of 8-bit samples.
//!
//! A [`PixelBuffer`] is created by the codec or by a transform and is never
//! modified afterwards. Every transform reads one buffer and allocates a
//! fresh one, which is what makes [`Snapshot`](crate::Snapshot) sharing safe.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing or reshaping a pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Sample data length doesn't match the dimensions and format.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The sample count of a `width x height` buffer cannot be addressed
    /// or allocated.
    #[error("Image too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },
}

/// Channel layout of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8-bit red, green, blue (3 bytes per pixel).
    #[default]
    Rgb24,
    /// 8-bit luma (1 byte per pixel).
    Gray8,
}

impl PixelFormat {
    /// Number of bytes used by one pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb24 => 3,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// An owned raster with row-major interleaved samples.
///
/// Invariant: `width > 0`, `height > 0` and
/// `data.len() == width * height * format.channels()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw samples, validating the size invariant.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let expected = Self::byte_len(width, height, format)?;
        if data.len() != expected {
            return Err(BufferError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Create an RGB24 buffer from `width * height * 3` bytes.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        Self::new(width, height, PixelFormat::Rgb24, data)
    }

    /// Create a Gray8 buffer from `width * height` bytes.
    pub fn from_gray(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        Self::new(width, height, PixelFormat::Gray8, data)
    }

    /// Create a buffer where every pixel has the same RGB value.
    ///
    /// For `Gray8` only the first channel of `color` is used.
    pub fn filled(
        width: u32,
        height: u32,
        format: PixelFormat,
        color: [u8; 3],
    ) -> Result<Self, BufferError> {
        let len = Self::byte_len(width, height, format)?;
        let data = match format {
            PixelFormat::Rgb24 => color.iter().copied().cycle().take(len).collect(),
            PixelFormat::Gray8 => vec![color[0]; len],
        };
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Build a buffer produced internally by a transform.
    ///
    /// Callers guarantee the invariant; it is only checked in debug builds.
    pub(crate) fn from_parts(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            Self::byte_len(width, height, format),
            Ok(data.len()),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            format,
            data,
        }
    }

    /// Number of bytes a `width x height` buffer of `format` occupies.
    ///
    /// Fails for zero dimensions and for sizes beyond `isize::MAX`, the
    /// largest allocation a `Vec` can hold.
    pub(crate) fn byte_len(
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<usize, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(format.channels()))
            .filter(|&n| n <= isize::MAX as usize)
            .ok_or(BufferError::TooLarge { width, height })
    }

    /// An empty sample vector with room for a `width x height` buffer.
    ///
    /// Allocation failure is reported as `TooLarge` instead of aborting.
    pub(crate) fn alloc_samples(
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Vec<u8>, BufferError> {
        let len = Self::byte_len(width, height, format)?;
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(len)
            .map_err(|_| BufferError::TooLarge { width, height })?;
        Ok(samples)
    }

    /// Create a buffer from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Self, BufferError> {
        let (width, height) = img.dimensions();
        Self::from_rgb(width, height, img.into_raw())
    }

    /// Create a buffer from an `image::GrayImage`.
    pub fn from_gray_image(img: image::GrayImage) -> Result<Self, BufferError> {
        let (width, height) = img.dimensions();
        Self::from_gray(width, height, img.into_raw())
    }

    /// Convert to an `image::DynamicImage` for the codec and resampling filters.
    pub fn to_dynamic_image(&self) -> image::DynamicImage {
        // The size invariant guarantees `from_raw` succeeds.
        let (width, height) = self.dimensions();
        let data = self.data.clone();
        match self.format {
            PixelFormat::Rgb24 => {
                image::RgbImage::from_raw(width, height, data).map(image::DynamicImage::ImageRgb8)
            }
            PixelFormat::Gray8 => {
                image::GrayImage::from_raw(width, height, data).map(image::DynamicImage::ImageLuma8)
            }
        }
        .unwrap_or_else(|| image::DynamicImage::new_rgb8(width, height))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Total number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its samples.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Samples of the pixel at (x, y), or `None` when out of range.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = self.format.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        Some(&self.data[idx..idx + c])
    }

    /// The pixel at (x, y) as RGB. Gray pixels expand to equal channels.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.sample(x, y).map(|s| match self.format {
            PixelFormat::Rgb24 => [s[0], s[1], s[2]],
            PixelFormat::Gray8 => [s[0], s[0], s[0]],
        })
    }
}
