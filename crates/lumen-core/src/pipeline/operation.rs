//! Transform steps as data, so pipelines can be replayed or sent across
//! the WASM boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One transform step of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Grayscale,
    InvertColors,
    Resize { width: u32, height: u32 },
    /// Clockwise rotation in degrees.
    Rotate { degrees: f64 },
    FlipHorizontal,
    FlipVertical,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Grayscale => f.write_str("grayscale"),
            Operation::InvertColors => f.write_str("invert_colors"),
            Operation::Resize { width, height } => write!(f, "resize({width}x{height})"),
            Operation::Rotate { degrees } => write!(f, "rotate({degrees}°)"),
            Operation::FlipHorizontal => f.write_str("flip_horizontal"),
            Operation::FlipVertical => f.write_str("flip_vertical"),
        }
    }
}
