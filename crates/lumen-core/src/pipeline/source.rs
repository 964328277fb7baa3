//! Where a pipeline gets its starting image.

use std::path::{Path, PathBuf};

use super::Snapshot;
use crate::buffer::PixelBuffer;
use crate::format::ImageFormat;

/// Input accepted by [`Builder::load`](super::Builder::load).
#[derive(Debug, Clone)]
pub enum LoadSource {
    /// Encoded bytes of a known container format.
    Bytes { data: Vec<u8>, format: ImageFormat },
    /// An in-memory raster, taken over by the builder.
    Buffer(PixelBuffer),
    /// A previously built snapshot; its pixels are shared, not copied.
    Snapshot(Snapshot),
    /// A file on disk; the format comes from the extension.
    File(PathBuf),
}

impl LoadSource {
    /// Encoded bytes of `format`.
    pub fn bytes(data: impl Into<Vec<u8>>, format: ImageFormat) -> Self {
        LoadSource::Bytes {
            data: data.into(),
            format,
        }
    }

    /// Short name of the source kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadSource::Bytes { .. } => "bytes",
            LoadSource::Buffer(_) => "buffer",
            LoadSource::Snapshot(_) => "snapshot",
            LoadSource::File(_) => "file",
        }
    }
}

impl From<PixelBuffer> for LoadSource {
    fn from(buffer: PixelBuffer) -> Self {
        LoadSource::Buffer(buffer)
    }
}

impl From<Snapshot> for LoadSource {
    fn from(snapshot: Snapshot) -> Self {
        LoadSource::Snapshot(snapshot)
    }
}

impl From<&Snapshot> for LoadSource {
    fn from(snapshot: &Snapshot) -> Self {
        LoadSource::Snapshot(snapshot.clone())
    }
}

impl From<PathBuf> for LoadSource {
    fn from(path: PathBuf) -> Self {
        LoadSource::File(path)
    }
}

impl From<&Path> for LoadSource {
    fn from(path: &Path) -> Self {
        LoadSource::File(path.to_path_buf())
    }
}
