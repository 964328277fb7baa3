//! Lumen WASM - WebAssembly bindings for Lumen
//!
//! This crate provides WASM bindings to expose the lumen-core pipeline
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for pixel buffers and snapshots
//! - `codec` - Image decoding and encoding bindings (PNG, JPEG, BMP)
//! - `pipeline` - The pipeline builder
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsPipeline, encode_image } from '@lumen/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const pipeline = new JsPipeline(undefined);
//! pipeline.load_bytes(bytes, 'jpg');
//! pipeline.grayscale();
//! const snapshot = pipeline.build();
//! console.log(`Built ${snapshot.width}x${snapshot.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod pipeline;
mod types;

// Re-export public types
pub use codec::{decode_image, encode_image};
pub use pipeline::JsPipeline;
pub use types::{JsPixelBuffer, JsSnapshot};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
