//! Pipeline builder WASM bindings.
//!
//! [`JsPipeline`] wraps the core `Builder`. Each transform replaces the
//! working image in place; a failing call leaves the working image as it
//! was. `build()` returns a [`JsSnapshot`] that can seed further pipelines.
//!
//! # Example
//!
//! ```typescript
//! import { JsPipeline } from '@lumen/wasm';
//!
//! const pipeline = new JsPipeline({ resize_filter: 'Bilinear' });
//! pipeline.load_bytes(bytes, 'jpg');
//! pipeline.grayscale();
//! pipeline.rotate(30);
//! const base = pipeline.build();
//!
//! const thumb = new JsPipeline(undefined);
//! thumb.load_snapshot(base);
//! thumb.resize(160, 120);
//! ```

use crate::types::{JsPixelBuffer, JsSnapshot};
use lumen_core::{Builder, ImageFormat, LoadSource, Operation, PipelineError, PipelineOptions};
use wasm_bindgen::prelude::*;

fn to_js(err: PipelineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A pipeline builder for JavaScript.
#[wasm_bindgen]
pub struct JsPipeline {
    inner: Builder,
}

#[wasm_bindgen]
impl JsPipeline {
    /// Create a pipeline. `options` is a partial `PipelineOptions` object, or
    /// `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsPipeline, JsValue> {
        let options: PipelineOptions = if options.is_undefined() || options.is_null() {
            PipelineOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Invalid pipeline options: {}", e)))?
        };
        Ok(Self::with_options(options))
    }

    /// Load encoded image bytes (`"png"`, `"jpg"`, `"jpeg"` or `"bmp"`).
    pub fn load_bytes(&mut self, bytes: Vec<u8>, format: &str) -> Result<(), JsValue> {
        let format: ImageFormat = format.parse().map_err(|e| to_js(PipelineError::from(e)))?;
        self.run(|b| b.load(LoadSource::bytes(bytes, format)))
    }

    /// Load a copy of a raw pixel buffer.
    pub fn load_buffer(&mut self, image: &JsPixelBuffer) -> Result<(), JsValue> {
        self.run(|b| b.load(image.core().clone()))
    }

    /// Load a snapshot. No pixels are copied.
    pub fn load_snapshot(&mut self, snapshot: &JsSnapshot) -> Result<(), JsValue> {
        self.run(|b| b.load(snapshot.core()))
    }

    pub fn grayscale(&mut self) -> Result<(), JsValue> {
        self.run(Builder::grayscale)
    }

    pub fn invert_colors(&mut self) -> Result<(), JsValue> {
        self.run(Builder::invert_colors)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.run(|b| b.resize(width, height))
    }

    /// Rotate clockwise by `degrees`. The canvas grows to fit.
    pub fn rotate(&mut self, degrees: f64) -> Result<(), JsValue> {
        self.run(|b| b.rotate(degrees))
    }

    pub fn flip_horizontal(&mut self) -> Result<(), JsValue> {
        self.run(Builder::flip_horizontal)
    }

    pub fn flip_vertical(&mut self) -> Result<(), JsValue> {
        self.run(Builder::flip_vertical)
    }

    /// Apply a list of operations such as `[{ op: 'rotate', degrees: 90 }]`.
    ///
    /// Stops at the first failing step; earlier steps stay applied.
    pub fn apply(&mut self, operations: JsValue) -> Result<(), JsValue> {
        let ops: Vec<Operation> = serde_wasm_bindgen::from_value(operations)
            .map_err(|e| JsValue::from_str(&format!("Invalid operations: {}", e)))?;
        self.run(|b| b.apply_all(ops))
    }

    /// Freeze the working image into a snapshot.
    pub fn build(&self) -> Result<JsSnapshot, JsValue> {
        self.inner.build().map(JsSnapshot::from_core).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// Operations applied since the last load, as a JSON-compatible array.
    pub fn applied(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.applied())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsPipeline {
    fn with_options(options: PipelineOptions) -> Self {
        Self {
            inner: Builder::with_options(options),
        }
    }

    fn run<F>(&mut self, step: F) -> Result<(), JsValue>
    where
        F: FnOnce(&mut Builder) -> Result<&mut Builder, PipelineError>,
    {
        step(&mut self.inner).map(|_| ()).map_err(to_js)
    }
}
