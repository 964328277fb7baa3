//! Luma calculation using ITU-R BT.709 coefficients.

/// ITU-R BT.709 coefficient for the red channel.
pub const LUMA_R: f64 = 0.2126;

/// ITU-R BT.709 coefficient for the green channel.
pub const LUMA_G: f64 = 0.7152;

/// ITU-R BT.709 coefficient for the blue channel.
pub const LUMA_B: f64 = 0.0722;

/// Perceptual gray value of an 8-bit RGB triple.
///
/// Computes `round(0.2126 R + 0.7152 G + 0.0722 B)` clamped to 0..=255.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64;
    lum.round().clamp(0.0, 255.0) as u8
}
