//! Pure pixel transforms.
//!
//! Every function here takes a `&PixelBuffer` and returns a freshly
//! allocated buffer; inputs are never modified. Only `resize` and `rotate`
//! can fail on a valid buffer: `resize` rejects a zero target, and both
//! report `BufferError::TooLarge` when the output cannot be allocated.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downwards
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Quarter turns and flips are exact pixel permutations

mod color;
mod flip;
mod resize;
mod rotation;

pub use color::{grayscale, invert_colors};
pub use flip::{flip_horizontal, flip_vertical, rotate180, rotate270, rotate90};
pub use resize::{resize, FilterType};
pub use rotation::{compute_rotated_bounds, quarter_turns, rotate, Interpolation, RotateOptions};
