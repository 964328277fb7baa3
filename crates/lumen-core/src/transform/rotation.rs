//! Arbitrary-angle rotation onto an expanded canvas.
//!
//! Positive angles rotate clockwise as displayed (the y axis points down).
//! Multiples of 90° are exact pixel permutations. Any other angle uses
//! inverse mapping: for each pixel of the output canvas we find the source
//! position it came from and sample there.
//!
//! The source is placed on the canvas at the whole-pixel offset
//! `((W' - W) / 2, (H' - H) / 2)` and rotated by θ about the canvas centre
//! `(cx, cy)`, so source and canvas pixel grids stay aligned. The inverse
//! transform is:
//! ```text
//! src_x =  (dst_x - cx) * cos(θ) + (dst_y - cy) * sin(θ) + cx - off_x
//! src_y = -(dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + cy - off_y
//! ```
//! Destination pixels whose source position falls outside the image are
//! filled with the background color.

use serde::{Deserialize, Serialize};

use super::flip::{rotate180, rotate270, rotate90};
use crate::buffer::{BufferError, PixelBuffer, PixelFormat};
use crate::luminance::luma_u8;

/// Tolerance, in degrees, for treating an angle as a whole quarter turn.
const QUARTER_TURN_EPSILON: f64 = 1e-6;

/// Tolerance for snapping a computed canvas side to an integer before `ceil`.
const BOUNDS_EPSILON: f64 = 1e-9;

/// Interpolation used for non-quarter-turn rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Copy the source pixel under the mapped position.
    #[default]
    Nearest,
    /// Weighted blend of the 4 surrounding source pixels.
    Bilinear,
}

/// Rotation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateOptions {
    pub interpolation: Interpolation,
    /// Fill for canvas pixels not covered by the rotated image.
    /// Gray images use the luma of this color.
    pub background: [u8; 3],
}

/// Number of clockwise quarter turns (0..=3) if `angle_degrees` is a
/// multiple of 90°, otherwise `None`.
pub fn quarter_turns(angle_degrees: f64) -> Option<u8> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let turns = (normalized / 90.0).round();
    if (normalized - turns * 90.0).abs() < QUARTER_TURN_EPSILON {
        Some((turns as u8) % 4)
    } else {
        None
    }
}

#[inline]
fn snap_ceil(v: f64) -> u32 {
    let nearest = v.round();
    let side = if (v - nearest).abs() < BOUNDS_EPSILON {
        nearest
    } else {
        v.ceil()
    };
    side.max(1.0) as u32
}

/// Compute the canvas that holds the whole rotated image without clipping.
///
/// `new_w = ceil(|w cos θ| + |h sin θ|)`, `new_h = ceil(|h cos θ| + |w sin θ|)`.
/// Quarter turns return exact dimensions, and neither side is ever zero.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    (snap_ceil(w * cos + h * sin), snap_ceil(h * cos + w * sin))
}

/// Rotate an image by `angle_degrees` (clockwise) onto an expanded canvas.
///
/// The source is centred on the new canvas. Non-finite angles leave the
/// image unchanged.
///
/// # Errors
///
/// Returns `BufferError::TooLarge` if the expanded canvas cannot be
/// allocated. Quarter turns never fail.
pub fn rotate(
    image: &PixelBuffer,
    angle_degrees: f64,
    options: &RotateOptions,
) -> Result<PixelBuffer, BufferError> {
    if !angle_degrees.is_finite() {
        return Ok(image.clone());
    }

    let rotated = match quarter_turns(angle_degrees) {
        Some(0) => image.clone(),
        Some(1) => rotate90(image),
        Some(2) => rotate180(image),
        Some(_) => rotate270(image),
        None => rotate_sampled(image, angle_degrees, options)?,
    };
    Ok(rotated)
}

/// Inverse-mapped rotation used for arbitrary angles.
fn rotate_sampled(
    image: &PixelBuffer,
    angle_degrees: f64,
    options: &RotateOptions,
) -> Result<PixelBuffer, BufferError> {
    let (src_w, src_h) = image.dimensions();
    let (dst_w, dst_h) = compute_rotated_bounds(src_w, src_h, angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    // Rotation centre, and where the source origin sits on the canvas
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;
    let offset_x = ((dst_w as i64 - src_w as i64) / 2) as f64;
    let offset_y = ((dst_h as i64 - src_h as i64) / 2) as f64;
    let src_cx = dst_cx - offset_x;
    let src_cy = dst_cy - offset_y;

    let background = background_sample(image.format(), options.background);
    let c = image.format().channels();
    let mut output = PixelBuffer::alloc_samples(dst_w, dst_h, image.format())?;

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Work with pixel centres
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos + dy * sin + src_cx;
            let src_y = -dx * sin + dy * cos + src_cy;

            let pixel = match options.interpolation {
                Interpolation::Nearest => sample_nearest(image, src_x, src_y),
                Interpolation::Bilinear => sample_bilinear(image, src_x, src_y),
            };
            output.extend_from_slice(&pixel.unwrap_or(background)[..c]);
        }
    }

    Ok(PixelBuffer::from_parts(dst_w, dst_h, image.format(), output))
}

fn background_sample(format: PixelFormat, color: [u8; 3]) -> [u8; 3] {
    match format {
        PixelFormat::Rgb24 => color,
        PixelFormat::Gray8 => {
            let l = luma_u8(color[0], color[1], color[2]);
            [l, l, l]
        }
    }
}

#[inline]
fn inside(image: &PixelBuffer, x: f64, y: f64) -> bool {
    x >= 0.0 && y >= 0.0 && x < image.width() as f64 && y < image.height() as f64
}

/// Read the samples of a pixel, padded to 3 channels.
#[inline]
fn raw_pixel(image: &PixelBuffer, px: u32, py: u32) -> [u8; 3] {
    let s = image.sample(px, py).unwrap_or(&[0, 0, 0]);
    match s.len() {
        1 => [s[0], 0, 0],
        _ => [s[0], s[1], s[2]],
    }
}

/// Sample the pixel whose area contains (x, y).
fn sample_nearest(image: &PixelBuffer, x: f64, y: f64) -> Option<[u8; 3]> {
    if !inside(image, x, y) {
        return None;
    }
    Some(raw_pixel(image, x.floor() as u32, y.floor() as u32))
}

/// Sample using bilinear interpolation between pixel centres.
///
/// Positions inside the image footprint but beyond the outermost pixel
/// centres clamp to the edge pixels.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> Option<[u8; 3]> {
    if !inside(image, x, y) {
        return None;
    }

    let max_x = (image.width() - 1) as f64;
    let max_y = (image.height() - 1) as f64;
    let fx = (x - 0.5).clamp(0.0, max_x);
    let fy = (y - 0.5).clamp(0.0, max_y);

    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(image.width() - 1);
    let y1 = (y0 + 1).min(image.height() - 1);

    // Fractional distances
    let tx = fx - x0 as f64;
    let ty = fy - y0 as f64;

    let p00 = raw_pixel(image, x0, y0);
    let p10 = raw_pixel(image, x1, y0);
    let p01 = raw_pixel(image, x0, y1);
    let p11 = raw_pixel(image, x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] as f64 * (1.0 - tx) * (1.0 - ty)
            + p10[i] as f64 * tx * (1.0 - ty)
            + p01[i] as f64 * (1.0 - tx) * ty
            + p11[i] as f64 * tx * ty;
        result[i] = v.round().clamp(0.0, 255.0) as u8;
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a simple test image with a gradient pattern.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y) * 8) as u8;
                pixels.extend_from_slice(&[v, v / 2, 255 - v]);
            }
        }
        PixelBuffer::from_rgb(width, height, pixels).unwrap()
    }

    #[test]
    fn test_quarter_turns() {
        assert_eq!(quarter_turns(0.0), Some(0));
        assert_eq!(quarter_turns(90.0), Some(1));
        assert_eq!(quarter_turns(180.0), Some(2));
        assert_eq!(quarter_turns(270.0), Some(3));
        assert_eq!(quarter_turns(360.0), Some(0));
        assert_eq!(quarter_turns(-90.0), Some(3));
        assert_eq!(quarter_turns(450.0), Some(1));
        assert_eq!(quarter_turns(45.0), None);
        assert_eq!(quarter_turns(89.9), None);
    }

    #[test]
    fn test_quarter_turn_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 0.0), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, 180.0), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, 270.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, 720.0), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, -450.0), (50, 100));
    }

    #[test]
    fn test_45_degree_bounds_use_ceil() {
        // 100 * (cos 45 + sin 45) = 141.42
        assert_eq!(compute_rotated_bounds(100, 100, 45.0), (142, 142));
    }

    #[test]
    fn test_30_degree_bounds() {
        // w' = 100*0.866 + 50*0.5 = 111.6, h' = 50*0.866 + 100*0.5 = 93.3
        assert_eq!(compute_rotated_bounds(100, 50, 30.0), (112, 94));
    }

    #[test]
    fn test_opposite_rotations_same_bounds() {
        assert_eq!(
            compute_rotated_bounds(100, 80, 30.0),
            compute_rotated_bounds(100, 80, -30.0)
        );
        assert_eq!(
            compute_rotated_bounds(100, 50, 30.0),
            compute_rotated_bounds(100, 50, 150.0)
        );
    }

    #[test]
    fn test_bounds_never_zero() {
        for angle in [1.0, 15.0, 45.0, 89.0, 90.0, 135.0, 179.0, 180.0, 270.0, 359.0] {
            let (w, h) = compute_rotated_bounds(1, 1, angle);
            assert!(w > 0, "Width should be > 0 for angle {}", angle);
            assert!(h > 0, "Height should be > 0 for angle {}", angle);
        }
    }

    #[test]
    fn test_zero_and_full_rotation_are_exact() {
        let img = test_image(7, 5);
        let opts = RotateOptions::default();
        assert_eq!(rotate(&img, 0.0, &opts).unwrap(), img);
        assert_eq!(rotate(&img, 360.0, &opts).unwrap(), img);
        assert_eq!(rotate(&img, -720.0, &opts).unwrap(), img);
    }

    #[test]
    fn test_quarter_rotations_are_exact() {
        let img = test_image(7, 5);
        let opts = RotateOptions::default();

        assert_eq!(rotate(&img, 90.0, &opts).unwrap(), rotate90(&img));
        assert_eq!(rotate(&img, 180.0, &opts).unwrap(), rotate180(&img));
        assert_eq!(rotate(&img, 270.0, &opts).unwrap(), rotate270(&img));
        assert_eq!(rotate(&img, -90.0, &opts).unwrap(), rotate270(&img));

        // No blur: every output value exists in the source
        let out = rotate(&img, 90.0, &opts).unwrap();
        assert_eq!(out.dimensions(), (5, 7));
        assert_eq!(out.pixel(4, 0), img.pixel(0, 0));
    }

    #[test]
    fn test_sampled_path_agrees_with_exact_quarter_turns() {
        let opts = RotateOptions::default();

        let square = test_image(3, 3);
        assert_eq!(rotate_sampled(&square, 90.0, &opts).unwrap(), rotate90(&square));

        let img = test_image(3, 2);
        assert_eq!(rotate_sampled(&img, 180.0, &opts).unwrap(), rotate180(&img));
    }

    #[test]
    fn test_non_finite_angle_is_identity() {
        let img = test_image(4, 3);
        let opts = RotateOptions::default();
        assert_eq!(rotate(&img, f64::NAN, &opts).unwrap(), img);
        assert_eq!(rotate(&img, f64::INFINITY, &opts).unwrap(), img);
    }

    #[test]
    fn test_rotation_expands_canvas_and_fills_background() {
        let img = PixelBuffer::filled(10, 10, PixelFormat::Rgb24, [200, 100, 50]).unwrap();
        let opts = RotateOptions {
            background: [1, 2, 3],
            ..Default::default()
        };
        let out = rotate(&img, 45.0, &opts).unwrap();

        assert_eq!(out.dimensions(), (15, 15));
        // Corners lie outside the rotated footprint
        assert_eq!(out.pixel(0, 0), Some([1, 2, 3]));
        assert_eq!(out.pixel(14, 14), Some([1, 2, 3]));
        // Centre is covered by the source
        assert_eq!(out.pixel(7, 7), Some([200, 100, 50]));
    }

    #[test]
    fn test_default_background_is_black() {
        let img = PixelBuffer::filled(4, 4, PixelFormat::Rgb24, [255, 255, 255]).unwrap();
        let out = rotate(&img, 30.0, &RotateOptions::default()).unwrap();
        assert_eq!(out.pixel(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_gray_background_uses_luma() {
        let img = PixelBuffer::from_gray(6, 6, vec![10; 36]).unwrap();
        let opts = RotateOptions {
            background: [255, 0, 0],
            ..Default::default()
        };
        let out = rotate(&img, 45.0, &opts).unwrap();
        assert_eq!(out.format(), PixelFormat::Gray8);
        assert_eq!(out.pixel(0, 0), Some([54, 54, 54]));
    }

    #[test]
    fn test_rotation_center_preservation() {
        let size = 21;
        let mut pixels = vec![0u8; (size * size * 3) as usize];

        // 3x3 white block at the centre
        let center = size / 2;
        for py in center - 1..=center + 1 {
            for px in center - 1..=center + 1 {
                let idx = ((py * size + px) * 3) as usize;
                pixels[idx..idx + 3].copy_from_slice(&[255, 255, 255]);
            }
        }
        let img = PixelBuffer::from_rgb(size, size, pixels).unwrap();

        for interpolation in [Interpolation::Nearest, Interpolation::Bilinear] {
            let opts = RotateOptions {
                interpolation,
                ..Default::default()
            };
            let out = rotate(&img, 45.0, &opts).unwrap();
            let (cx, cy) = (out.width() / 2, out.height() / 2);
            let bright = (cy - 1..=cy + 1)
                .flat_map(|y| (cx - 1..=cx + 1).map(move |x| (x, y)))
                .any(|(x, y)| out.pixel(x, y).map_or(false, |p| p[0] > 200));
            assert!(bright, "Centre should stay bright with {:?}", interpolation);
        }
    }

    #[test]
    fn test_bilinear_on_flat_image_is_flat_inside() {
        let img = PixelBuffer::filled(20, 20, PixelFormat::Rgb24, [90, 90, 90]).unwrap();
        let opts = RotateOptions {
            interpolation: Interpolation::Bilinear,
            ..Default::default()
        };
        let out = rotate(&img, 20.0, &opts).unwrap();
        let (cx, cy) = (out.width() / 2, out.height() / 2);
        assert_eq!(out.pixel(cx, cy), Some([90, 90, 90]));
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = PixelBuffer::from_rgb(1, 1, vec![128, 64, 32]).unwrap();
        let opts = RotateOptions::default();

        for angle in [0.0, 90.0, 180.0, 270.0, 360.0] {
            assert_eq!(rotate(&img, angle, &opts).unwrap(), img);
        }
        for angle in [30.0, 45.0, 123.0] {
            let out = rotate(&img, angle, &opts).unwrap();
            assert!(out.width() >= 1 && out.height() >= 1);
            assert_eq!(out.as_bytes().len(), out.pixel_count() * 3);
        }
    }

    #[test]
    fn test_single_pixel_survives_small_rotation() {
        let img = PixelBuffer::from_rgb(1, 1, vec![200, 100, 50]).unwrap();
        let opts = RotateOptions {
            background: [1, 2, 3],
            ..Default::default()
        };

        for angle in [1.0, 0.001, -1.0] {
            let out = rotate(&img, angle, &opts).unwrap();
            assert_eq!(out.dimensions(), (2, 2), "angle {}", angle);
            assert_eq!(out.pixel(0, 0), Some([200, 100, 50]), "angle {}", angle);
        }
    }

    #[test]
    fn test_small_rotation_keeps_source_on_pixel_grid() {
        // 4x4 at 1 degree grows to 5x5 with the source at offset (0, 0)
        let img = test_image(4, 4);
        let out = rotate(&img, 1.0, &RotateOptions::default()).unwrap();
        assert_eq!(out.dimensions(), (5, 5));
        assert_eq!(out.pixel(1, 1), img.pixel(1, 1));
        assert_eq!(out.pixel(2, 2), img.pixel(2, 2));
    }

    #[test]
    fn test_very_thin_image_rotation() {
        let img = test_image(100, 1);
        let out = rotate(&img, 45.0, &RotateOptions::default()).unwrap();
        assert_eq!(out.dimensions(), compute_rotated_bounds(100, 1, 45.0));

        let img = test_image(1, 100);
        let out = rotate(&img, 45.0, &RotateOptions::default()).unwrap();
        assert_eq!(out.dimensions(), compute_rotated_bounds(1, 100, 45.0));
    }
}
