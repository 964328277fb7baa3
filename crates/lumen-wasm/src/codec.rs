//! Image decoding and encoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode PNG, JPEG or BMP bytes into a pixel buffer
//! - [`encode_image`] - Encode a pixel buffer into PNG, JPEG or BMP bytes
//!
//! Formats are named by file extension (`"png"`, `"jpg"`, `"jpeg"`, `"bmp"`),
//! case-insensitively.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, encode_image } from '@lumen/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes, 'jpg');
//! const png = encode_image(image, 'png', 90);
//! ```

use crate::types::JsPixelBuffer;
use lumen_core::decode::{self, DecodeOptions};
use lumen_core::encode::{self, EncodeOptions};
use lumen_core::{ImageFormat, PipelineError};
use wasm_bindgen::prelude::*;

/// Decode encoded image bytes.
///
/// JPEG input has its EXIF orientation applied.
///
/// # Errors
///
/// Returns an error if the format name is unknown or the bytes do not
/// decode as that format.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8], format: &str) -> Result<JsPixelBuffer, JsValue> {
    decode_inner(bytes, format).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a pixel buffer.
///
/// `quality` only affects JPEG output and is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_image(image: &JsPixelBuffer, format: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode_inner(image, format, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn decode_inner(bytes: &[u8], format: &str) -> Result<JsPixelBuffer, PipelineError> {
    let format: ImageFormat = format.parse()?;
    let buffer = decode::decode_with(bytes, format, &DecodeOptions::default())?;
    Ok(JsPixelBuffer::from_core(buffer))
}

fn encode_inner(
    image: &JsPixelBuffer,
    format: &str,
    quality: u8,
) -> Result<Vec<u8>, PipelineError> {
    let format: ImageFormat = format.parse()?;
    let options = EncodeOptions {
        jpeg_quality: quality,
    };
    Ok(encode::encode(image.core(), format, &options)?)
}
