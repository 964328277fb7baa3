//! Container formats understood by the codec boundary.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A format name the codec cannot handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported image format: {0:?}")]
pub struct UnsupportedFormat(pub String);

/// Encoded image container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
}

impl ImageFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, UnsupportedFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| UnsupportedFormat(path.display().to_string()))?
            .parse()
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Bmp => "bmp",
        }
    }

    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
        }
    }

    pub(crate) fn from_image_format(format: image::ImageFormat) -> Result<Self, UnsupportedFormat> {
        match format {
            image::ImageFormat::Png => Ok(ImageFormat::Png),
            image::ImageFormat::Jpeg => Ok(ImageFormat::Jpeg),
            image::ImageFormat::Bmp => Ok(ImageFormat::Bmp),
            other => Err(UnsupportedFormat(format!("{other:?}"))),
        }
    }
}

impl FromStr for ImageFormat {
    type Err = UnsupportedFormat;

    /// Accepts `png`, `jpg`, `jpeg` and `bmp`, case-insensitive, with or
    /// without a leading dot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('.');
        match name.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "bmp" => Ok(ImageFormat::Bmp),
            _ => Err(UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
