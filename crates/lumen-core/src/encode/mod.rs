//! Encoding: [`PixelBuffer`](crate::PixelBuffer) to a byte stream.
//!
//! # Examples
//!
//! ```ignore
//! use lumen_core::encode::{encode, EncodeOptions};
//! use lumen_core::{ImageFormat, PixelBuffer};
//!
//! let image = PixelBuffer::from_rgb(100, 100, vec![128u8; 100 * 100 * 3]).unwrap();
//! let jpeg = encode(&image, ImageFormat::Jpeg, &EncodeOptions::default()).unwrap();
//! println!("Encoded {} bytes", jpeg.len());
//! ```

mod encoder;

pub use encoder::{encode, EncodeError, EncodeOptions};
