//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Lumen
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use lumen_core::{PixelBuffer, PixelFormat, Snapshot};
use wasm_bindgen::prelude::*;

/// A raw pixel buffer for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
#[derive(Debug)]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create an RGB buffer (3 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::from_rgb(width, height, pixels)
            .map(Self::from_core)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Create a gray buffer (1 byte per pixel, row-major order).
    pub fn gray(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::from_gray(width, height, pixels)
            .map(Self::from_core)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Bytes per pixel: 3 for RGB, 1 for gray.
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> usize {
        self.inner.format().channels()
    }

    #[wasm_bindgen(getter)]
    pub fn is_gray(&self) -> bool {
        self.inner.format() == PixelFormat::Gray8
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.as_bytes().len()
    }

    /// Returns the pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.as_bytes().to_vec()
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_core(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn core(&self) -> &PixelBuffer {
        &self.inner
    }
}

/// A finished, immutable image for JavaScript.
///
/// Cloning is cheap: the pixels are shared with the original.
#[wasm_bindgen]
#[derive(Clone)]
pub struct JsSnapshot {
    inner: Snapshot,
}

#[wasm_bindgen]
impl JsSnapshot {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Another handle to the same pixels.
    #[wasm_bindgen(js_name = clone)]
    pub fn duplicate(&self) -> JsSnapshot {
        self.clone()
    }

    /// A copy of the pixels as a raw buffer.
    pub fn to_buffer(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_core(self.inner.to_buffer())
    }

    /// Returns the pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().as_bytes().to_vec()
    }
}

impl JsSnapshot {
    pub(crate) fn from_core(inner: Snapshot) -> Self {
        Self { inner }
    }

    pub(crate) fn core(&self) -> &Snapshot {
        &self.inner
    }
}
