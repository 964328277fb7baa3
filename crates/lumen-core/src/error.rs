//! Errors surfaced by the pipeline builder and persistence layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::buffer::BufferError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::format::UnsupportedFormat;

/// Error type for [`Builder`](crate::Builder), [`Snapshot`](crate::Snapshot)
/// and the persistence functions.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A transform or `build` was called before any successful `load`.
    #[error("No image loaded: call load() before transforming or building")]
    NotLoaded,

    /// Rotation angle is NaN or infinite.
    #[error("Invalid rotation angle: {0}")]
    InvalidAngle(f64),

    /// Invalid target dimensions or raw buffer.
    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormat),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for pipeline operations.
pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
