//! Decoding: byte stream to [`PixelBuffer`](crate::PixelBuffer).
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and BMP data of a named format
//! - Sniffing the format from the leading bytes
//! - Correcting JPEG orientation from the EXIF tag
//!
//! # Examples
//!
//! ```ignore
//! use lumen_core::decode::decode;
//! use lumen_core::ImageFormat;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode(&bytes, ImageFormat::Jpeg).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod decoder;
mod types;

pub use decoder::{decode, decode_guessed, decode_with, get_orientation};
pub use types::{DecodeError, DecodeOptions, Orientation};
