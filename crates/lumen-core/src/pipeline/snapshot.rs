//! Immutable, cheaply cloneable handle to a finished image.

use std::path::Path;
use std::sync::Arc;

use crate::buffer::{PixelBuffer, PixelFormat};
use crate::encode::{encode, EncodeError, EncodeOptions};
use crate::error::Result;
use crate::format::ImageFormat;
use crate::persist;

/// A finished image that can seed any number of further pipelines.
///
/// Cloning copies a reference-counted handle, never the pixels. Nothing can
/// mutate the shared buffer, so snapshots are `Send + Sync` and may be
/// loaded by many builders at once.
#[derive(Debug, Clone)]
pub struct Snapshot {
    buffer: Arc<PixelBuffer>,
}

impl Snapshot {
    /// Wrap a buffer.
    pub fn new(buffer: PixelBuffer) -> Self {
        Self {
            buffer: Arc::new(buffer),
        }
    }

    pub(crate) fn from_shared(buffer: Arc<PixelBuffer>) -> Self {
        Self { buffer }
    }

    pub(crate) fn shared(&self) -> Arc<PixelBuffer> {
        Arc::clone(&self.buffer)
    }

    /// Read-only view of the pixels.
    #[inline]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.buffer
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.buffer.format()
    }

    /// True when both snapshots share the same pixel storage.
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }

    /// An owned copy of the pixels.
    pub fn to_buffer(&self) -> PixelBuffer {
        PixelBuffer::clone(&self.buffer)
    }

    /// Encode into `format`.
    pub fn encode(
        &self,
        format: ImageFormat,
        options: &EncodeOptions,
    ) -> Result<Vec<u8>, EncodeError> {
        encode(&self.buffer, format, options)
    }

    /// Encode with default options and write to `path`.
    pub fn save(&self, path: impl AsRef<Path>, format: ImageFormat) -> Result<()> {
        self.save_with(path, format, &EncodeOptions::default())
    }

    /// Encode with `options` and write to `path`.
    pub fn save_with(
        &self,
        path: impl AsRef<Path>,
        format: ImageFormat,
        options: &EncodeOptions,
    ) -> Result<()> {
        persist::save(&self.buffer, path, format, options)
    }
}

impl From<PixelBuffer> for Snapshot {
    fn from(buffer: PixelBuffer) -> Self {
        Self::new(buffer)
    }
}

impl AsRef<PixelBuffer> for Snapshot {
    fn as_ref(&self) -> &PixelBuffer {
        &self.buffer
    }
}
