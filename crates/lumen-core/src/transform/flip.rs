//! Exact geometric permutations: mirror flips and quarter turns.
//!
//! None of these resample; every output pixel is a copy of exactly one
//! input pixel. Quarter turns are clockwise on screen (y axis down).

use crate::buffer::PixelBuffer;

/// Build a new buffer of `dst_w x dst_h` whose pixel (x, y) is copied from
/// the source pixel returned by `map(x, y)`.
///
/// `dst_w * dst_h` must equal the source pixel count, so the output is
/// exactly as large as the input.
fn remap<F>(image: &PixelBuffer, dst_w: u32, dst_h: u32, map: F) -> PixelBuffer
where
    F: Fn(u32, u32) -> (u32, u32),
{
    let c = image.format().channels();
    let src_w = image.width() as usize;
    let src = image.as_bytes();
    let mut output = Vec::with_capacity(src.len());

    for y in 0..dst_h {
        for x in 0..dst_w {
            let (sx, sy) = map(x, y);
            let idx = (sy as usize * src_w + sx as usize) * c;
            output.extend_from_slice(&src[idx..idx + c]);
        }
    }

    PixelBuffer::from_parts(dst_w, dst_h, image.format(), output)
}

/// Mirror left to right: `result[W-1-x, y] = image[x, y]`.
pub fn flip_horizontal(image: &PixelBuffer) -> PixelBuffer {
    let (w, h) = image.dimensions();
    remap(image, w, h, |x, y| (w - 1 - x, y))
}

/// Mirror top to bottom: `result[x, H-1-y] = image[x, y]`.
pub fn flip_vertical(image: &PixelBuffer) -> PixelBuffer {
    let (w, h) = image.dimensions();
    remap(image, w, h, |x, y| (x, h - 1 - y))
}

/// Rotate 90° clockwise. Width and height swap.
pub fn rotate90(image: &PixelBuffer) -> PixelBuffer {
    let (w, h) = image.dimensions();
    remap(image, h, w, |x, y| (y, h - 1 - x))
}

/// Rotate 180°.
pub fn rotate180(image: &PixelBuffer) -> PixelBuffer {
    let (w, h) = image.dimensions();
    remap(image, w, h, |x, y| (w - 1 - x, h - 1 - y))
}

/// Rotate 270° clockwise (90° counter-clockwise). Width and height swap.
pub fn rotate270(image: &PixelBuffer) -> PixelBuffer {
    let (w, h) = image.dimensions();
    remap(image, h, w, |x, y| (w - 1 - y, x))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=12, 1u32..=12, any::<bool>()).prop_flat_map(|(w, h, gray)| {
            let channels = if gray { 1 } else { 3 };
            let len = (w * h) as usize * channels;
            prop::collection::vec(any::<u8>(), len..=len).prop_map(move |data| {
                if gray {
                    PixelBuffer::from_gray(w, h, data).unwrap()
                } else {
                    PixelBuffer::from_rgb(w, h, data).unwrap()
                }
            })
        })
    }

    proptest! {
        /// Property: flipping twice restores the original.
        #[test]
        fn prop_flips_are_involutions(img in buffer_strategy()) {
            prop_assert_eq!(&flip_horizontal(&flip_horizontal(&img)), &img);
            prop_assert_eq!(&flip_vertical(&flip_vertical(&img)), &img);
        }

        /// Property: four quarter turns restore the original.
        #[test]
        fn prop_four_quarter_turns_identity(img in buffer_strategy()) {
            let out = rotate90(&rotate90(&rotate90(&rotate90(&img))));
            prop_assert_eq!(out, img);
        }

        /// Property: 180° equals flipping both axes.
        #[test]
        fn prop_rotate180_is_double_flip(img in buffer_strategy()) {
            prop_assert_eq!(rotate180(&img), flip_vertical(&flip_horizontal(&img)));
        }
    }
}
