//! Builder configuration.

use serde::{Deserialize, Serialize};

use crate::decode::DecodeOptions;
use crate::transform::{FilterType, RotateOptions};

/// Settings applied by a [`Builder`](super::Builder) to every call.
///
/// All fields default, so partial configurations deserialize:
///
/// ```ignore
/// let options: PipelineOptions = serde_json::from_str(r#"{"resize_filter": "Bilinear"}"#)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Sampling used by `resize`.
    pub resize_filter: FilterType,
    /// Interpolation and background used by `rotate`.
    pub rotate: RotateOptions,
    /// Options for loads from bytes or files.
    pub decode: DecodeOptions,
}
