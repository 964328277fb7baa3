//! Mutable staging area that sequences transforms over one working image.

use std::sync::Arc;

use log::{debug, warn};

use super::{LoadSource, Operation, PipelineOptions, Snapshot};
use crate::buffer::PixelBuffer;
use crate::decode::decode_with;
use crate::error::{PipelineError, Result};
use crate::persist;
use crate::transform;

/// Builds a [`Snapshot`] by loading an image and applying transforms.
///
/// Transforms may be called in any order and any number of times; each one
/// replaces the working image with a new buffer. Every call made before a
/// successful [`load`](Builder::load) fails with [`PipelineError::NotLoaded`],
/// and a failing call leaves the working image untouched.
///
/// ```ignore
/// let snapshot = Builder::new()
///     .load(LoadSource::bytes(bytes, ImageFormat::Jpeg))?
///     .grayscale()?
///     .rotate(90.0)?
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    options: PipelineOptions,
    working: Option<Arc<PixelBuffer>>,
    applied: Vec<Operation>,
}

impl Builder {
    /// An empty builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty builder with the given options.
    pub fn with_options(options: PipelineOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Load the working image, replacing any previous one.
    ///
    /// Loading a [`Snapshot`] shares its pixels; the snapshot itself is never
    /// affected by later transforms.
    pub fn load(&mut self, source: impl Into<LoadSource>) -> Result<&mut Self> {
        let source = source.into();
        let kind = source.kind();

        let buffer = match source {
            LoadSource::Bytes { data, format } => {
                Arc::new(decode_with(&data, format, &self.options.decode)?)
            }
            LoadSource::Buffer(buffer) => Arc::new(buffer),
            LoadSource::Snapshot(snapshot) => snapshot.shared(),
            LoadSource::File(path) => Arc::new(persist::open(&path, &self.options.decode)?),
        };

        debug!(
            "Builder::load {} -> {}x{} {:?}",
            kind,
            buffer.width(),
            buffer.height(),
            buffer.format()
        );

        self.working = Some(buffer);
        self.applied.clear();
        Ok(self)
    }

    /// Convert to 8-bit gray using BT.709 luma weights.
    pub fn grayscale(&mut self) -> Result<&mut Self> {
        self.apply(Operation::Grayscale)
    }

    /// Invert every color channel.
    pub fn invert_colors(&mut self) -> Result<&mut Self> {
        self.apply(Operation::InvertColors)
    }

    /// Resize to exact dimensions using the configured filter.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<&mut Self> {
        self.apply(Operation::Resize { width, height })
    }

    /// Rotate clockwise by `degrees`, expanding the canvas to fit.
    pub fn rotate(&mut self, degrees: f64) -> Result<&mut Self> {
        self.apply(Operation::Rotate { degrees })
    }

    /// Mirror left to right.
    pub fn flip_horizontal(&mut self) -> Result<&mut Self> {
        self.apply(Operation::FlipHorizontal)
    }

    /// Mirror top to bottom.
    pub fn flip_vertical(&mut self) -> Result<&mut Self> {
        self.apply(Operation::FlipVertical)
    }

    /// Apply one transform step.
    pub fn apply(&mut self, op: Operation) -> Result<&mut Self> {
        let current = self.require_loaded(&op)?;

        let next = match op {
            Operation::Grayscale => transform::grayscale(current),
            Operation::InvertColors => transform::invert_colors(current),
            Operation::Resize { width, height } => {
                transform::resize(current, width, height, self.options.resize_filter)?
            }
            Operation::Rotate { degrees } => {
                if !degrees.is_finite() {
                    return Err(PipelineError::InvalidAngle(degrees));
                }
                transform::rotate(current, degrees, &self.options.rotate)?
            }
            Operation::FlipHorizontal => transform::flip_horizontal(current),
            Operation::FlipVertical => transform::flip_vertical(current),
        };

        debug!("Builder::{} -> {}x{}", op, next.width(), next.height());

        self.working = Some(Arc::new(next));
        self.applied.push(op);
        Ok(self)
    }

    /// Apply a sequence of steps, stopping at the first failure.
    pub fn apply_all<I>(&mut self, ops: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.apply(op)?;
        }
        Ok(self)
    }

    /// Freeze the working image into a snapshot.
    ///
    /// The snapshot shares the working buffer, so this is O(1). The builder
    /// stays usable; later transforms never affect the returned snapshot.
    pub fn build(&self) -> Result<Snapshot> {
        let Some(buffer) = &self.working else {
            warn!("Builder::build rejected: no image loaded");
            return Err(PipelineError::NotLoaded);
        };
        debug!(
            "Builder::build -> {}x{} after {} step(s)",
            buffer.width(),
            buffer.height(),
            self.applied.len()
        );
        Ok(Snapshot::from_shared(Arc::clone(buffer)))
    }

    /// Whether an image has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.working.is_some()
    }

    /// The current working image, if any.
    pub fn current(&self) -> Option<&PixelBuffer> {
        self.working.as_deref()
    }

    /// Steps applied since the last load.
    pub fn applied(&self) -> &[Operation] {
        &self.applied
    }

    fn require_loaded(&self, op: &Operation) -> Result<&PixelBuffer> {
        self.working.as_deref().ok_or_else(|| {
            warn!("Builder::{} rejected: no image loaded", op);
            PipelineError::NotLoaded
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{BufferError, PixelFormat};
    use crate::encode::{encode, EncodeOptions};
    use crate::format::ImageFormat;
    use crate::transform::{FilterType, RotateOptions};

    fn primaries_2x2() -> PixelBuffer {
        PixelBuffer::from_rgb(
            2,
            2,
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255],
        )
        .unwrap()
    }

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let data = (0..width * height)
            .flat_map(|i| {
                let v = (i * 7 % 256) as u8;
                [v, 255 - v, v / 2]
            })
            .collect();
        PixelBuffer::from_rgb(width, height, data).unwrap()
    }

    #[test]
    fn test_every_operation_requires_load() {
        let ops = [
            Operation::Grayscale,
            Operation::InvertColors,
            Operation::Resize {
                width: 2,
                height: 2,
            },
            Operation::Rotate { degrees: 90.0 },
            Operation::FlipHorizontal,
            Operation::FlipVertical,
        ];
        for op in ops {
            let mut builder = Builder::new();
            assert!(
                matches!(builder.apply(op), Err(PipelineError::NotLoaded)),
                "{op} should fail before load"
            );
        }

        let mut builder = Builder::new();
        assert!(matches!(builder.grayscale(), Err(PipelineError::NotLoaded)));
        assert!(matches!(builder.invert_colors(), Err(PipelineError::NotLoaded)));
        assert!(matches!(builder.resize(1, 1), Err(PipelineError::NotLoaded)));
        assert!(matches!(builder.rotate(10.0), Err(PipelineError::NotLoaded)));
        assert!(matches!(builder.flip_horizontal(), Err(PipelineError::NotLoaded)));
        assert!(matches!(builder.flip_vertical(), Err(PipelineError::NotLoaded)));
        assert!(matches!(builder.build(), Err(PipelineError::NotLoaded)));
        assert!(!builder.is_loaded());
    }

    #[test]
    fn test_grayscale_scenario() {
        let snapshot = Builder::new()
            .load(primaries_2x2())
            .unwrap()
            .grayscale()
            .unwrap()
            .build()
            .unwrap();

        let pixels = snapshot.pixels();
        assert_eq!(pixels.format(), PixelFormat::Gray8);
        assert_eq!(pixels.pixel(0, 0), Some([54, 54, 54]));
        assert_eq!(pixels.pixel(1, 0), Some([182, 182, 182]));
        assert_eq!(pixels.pixel(0, 1), Some([18, 18, 18]));
        assert_eq!(pixels.pixel(1, 1), Some([255, 255, 255]));
    }

    #[test]
    fn test_invert_scenario() {
        let src = PixelBuffer::from_rgb(3, 1, vec![255, 0, 10, 128, 64, 32, 0, 255, 200]).unwrap();
        let snapshot = Builder::new()
            .load(src.clone())
            .unwrap()
            .invert_colors()
            .unwrap()
            .build()
            .unwrap();

        for x in 0..3 {
            let [r, g, b] = src.pixel(x, 0).unwrap();
            assert_eq!(snapshot.pixels().pixel(x, 0), Some([255 - r, 255 - g, 255 - b]));
        }
    }

    #[test]
    fn test_snapshot_aliasing_safety() {
        let base = Builder::new()
            .load(gradient(5, 4))
            .unwrap()
            .build()
            .unwrap();
        let original = base.pixels().clone();

        let clone = base.clone();
        let derived = Builder::new()
            .load(&clone)
            .unwrap()
            .invert_colors()
            .unwrap()
            .rotate(90.0)
            .unwrap()
            .flip_vertical()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(*base.pixels(), original);
        assert_eq!(*clone.pixels(), original);
        assert!(base.ptr_eq(&clone));
        assert!(!derived.ptr_eq(&base));
        assert_ne!(*derived.pixels(), original);
    }

    #[test]
    fn test_build_does_not_freeze_later_steps() {
        let mut builder = Builder::new();
        builder.load(gradient(3, 3)).unwrap();
        let first = builder.build().unwrap();

        builder.grayscale().unwrap();
        let second = builder.build().unwrap();

        assert_eq!(first.format(), PixelFormat::Rgb24);
        assert_eq!(second.format(), PixelFormat::Gray8);
    }

    #[test]
    fn test_load_snapshot_shares_without_copy() {
        let base = Snapshot::new(gradient(4, 4));
        let mut builder = Builder::new();
        builder.load(&base).unwrap();
        assert!(builder.build().unwrap().ptr_eq(&base));
    }

    #[test]
    fn test_fan_out_from_one_snapshot() {
        let base = Snapshot::new(gradient(6, 3));

        let left = Builder::new()
            .load(&base)
            .unwrap()
            .flip_horizontal()
            .unwrap()
            .build()
            .unwrap();
        let turned = Builder::new()
            .load(&base)
            .unwrap()
            .rotate(90.0)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(left.pixels().dimensions(), (6, 3));
        assert_eq!(turned.pixels().dimensions(), (3, 6));
        assert_eq!(*base.pixels(), gradient(6, 3));
    }

    #[test]
    fn test_fan_out_across_threads() {
        let base = Snapshot::new(gradient(8, 8));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let base = base.clone();
                std::thread::spawn(move || {
                    Builder::new()
                        .load(base)
                        .and_then(|b| b.rotate(90.0 * i as f64))
                        .and_then(|b| b.build())
                })
            })
            .collect();

        for handle in handles {
            let snap = handle.join().unwrap().unwrap();
            assert_eq!(snap.pixels().dimensions(), (8, 8));
        }
        assert_eq!(*base.pixels(), gradient(8, 8));
    }

    #[test]
    fn test_order_matters() {
        let src = gradient(4, 2);
        let a = Builder::new()
            .load(src.clone())
            .unwrap()
            .rotate(30.0)
            .unwrap()
            .resize(6, 6)
            .unwrap()
            .build()
            .unwrap();
        let b = Builder::new()
            .load(src)
            .unwrap()
            .resize(6, 6)
            .unwrap()
            .rotate(30.0)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(a.pixels().dimensions(), (6, 6));
        assert_ne!(a.pixels().dimensions(), b.pixels().dimensions());
    }

    #[test]
    fn test_failed_step_keeps_working_image() {
        let mut builder = Builder::new();
        builder
            .load(gradient(4, 4))
            .unwrap()
            .flip_vertical()
            .unwrap();
        let before = builder.current().unwrap().clone();

        assert!(matches!(builder.resize(0, 3), Err(PipelineError::Buffer(_))));
        assert!(matches!(
            builder.resize(u32::MAX, u32::MAX),
            Err(PipelineError::Buffer(BufferError::TooLarge { .. }))
        ));
        assert!(matches!(
            builder.rotate(f64::NAN),
            Err(PipelineError::InvalidAngle(_))
        ));

        assert_eq!(builder.current(), Some(&before));
        assert_eq!(builder.applied(), &[Operation::FlipVertical]);
    }

    #[test]
    fn test_applied_resets_on_load() {
        let mut builder = Builder::new();
        builder
            .load(gradient(2, 2))
            .unwrap()
            .grayscale()
            .unwrap()
            .resize(4, 4)
            .unwrap();
        assert_eq!(
            builder.applied(),
            &[
                Operation::Grayscale,
                Operation::Resize {
                    width: 4,
                    height: 4
                }
            ]
        );

        builder.load(gradient(2, 2)).unwrap();
        assert!(builder.applied().is_empty());
    }

    #[test]
    fn test_apply_all_replays_pipeline() {
        let ops = vec![
            Operation::InvertColors,
            Operation::Rotate { degrees: 180.0 },
            Operation::FlipHorizontal,
        ];
        let src = gradient(5, 3);

        let replayed = Builder::new()
            .load(src.clone())
            .unwrap()
            .apply_all(ops)
            .unwrap()
            .build()
            .unwrap();

        // 180° then horizontal flip == vertical flip
        let expected = transform::flip_vertical(&transform::invert_colors(&src));
        assert_eq!(*replayed.pixels(), expected);
    }

    #[test]
    fn test_load_from_bytes() {
        let src = gradient(3, 2);
        let png = encode(&src, ImageFormat::Png, &EncodeOptions::default()).unwrap();

        let snap = Builder::new()
            .load(LoadSource::bytes(png, ImageFormat::Png))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(*snap.pixels(), src);
    }

    #[test]
    fn test_failed_load_reports_decode_error() {
        let mut builder = Builder::new();
        let err = builder
            .load(LoadSource::bytes(vec![1u8, 2, 3], ImageFormat::Png))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
        assert!(!builder.is_loaded());
    }

    #[test]
    fn test_options_drive_transforms() {
        let options = PipelineOptions {
            resize_filter: FilterType::Bilinear,
            rotate: RotateOptions {
                background: [9, 9, 9],
                ..Default::default()
            },
            ..Default::default()
        };
        let snap = Builder::with_options(options)
            .load(PixelBuffer::filled(4, 4, PixelFormat::Rgb24, [200, 200, 200]).unwrap())
            .unwrap()
            .rotate(45.0)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(snap.pixels().pixel(0, 0), Some([9, 9, 9]));
    }

    #[test]
    fn test_single_pixel_through_every_step() {
        let snap = Builder::new()
            .load(PixelBuffer::from_rgb(1, 1, vec![10, 20, 30]).unwrap())
            .unwrap()
            .flip_horizontal()
            .unwrap()
            .flip_vertical()
            .unwrap()
            .rotate(270.0)
            .unwrap()
            .resize(1, 1)
            .unwrap()
            .invert_colors()
            .unwrap()
            .grayscale()
            .unwrap()
            .build()
            .unwrap();

        // luma of (245, 235, 225)
        assert_eq!(snap.pixels().dimensions(), (1, 1));
        assert_eq!(snap.pixels().as_bytes(), &[236]);
    }
}
