//! Lumen Core - in-memory raster transformation pipeline
//!
//! This crate loads a pixel buffer from encoded bytes, a file, a raw buffer
//! or an earlier snapshot, applies geometric and color transforms in any
//! order, and produces an immutable [`Snapshot`] that can be saved or used
//! as the base of further pipelines.
//!
//! # Module Structure
//!
//! - `buffer` - The [`PixelBuffer`] data type (RGB24 or Gray8)
//! - `transform` - Pure pixel algorithms (grayscale, invert, resize, rotate, flips)
//! - `pipeline` - The [`Builder`] staging object and [`Snapshot`] handle
//! - `decode` / `encode` - Codec boundary (PNG, JPEG, BMP)
//! - `persist` - Reading and writing files
//!
//! # Usage
//!
//! ```ignore
//! use lumen_core::{Builder, ImageFormat, LoadSource};
//!
//! let base = Builder::new()
//!     .load(LoadSource::File("photo.jpg".into()))?
//!     .build()?;
//!
//! Builder::new()
//!     .load(&base)?
//!     .grayscale()?
//!     .rotate(15.0)?
//!     .build()?
//!     .save("gray.png", ImageFormat::Png)?;
//! ```

pub mod buffer;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod luminance;
pub mod persist;
pub mod pipeline;
pub mod transform;

pub use buffer::{BufferError, PixelBuffer, PixelFormat};
pub use error::PipelineError;
pub use format::{ImageFormat, UnsupportedFormat};
pub use pipeline::{Builder, LoadSource, Operation, PipelineOptions, Snapshot};
pub use transform::{FilterType, Interpolation, RotateOptions};
