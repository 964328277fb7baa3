//! Reading and writing encoded images on disk.

use std::fs;
use std::path::Path;

use log::debug;

use crate::buffer::PixelBuffer;
use crate::decode::{decode_guessed, decode_with, DecodeOptions};
use crate::encode::{encode, EncodeOptions};
use crate::error::{PipelineError, Result};
use crate::format::ImageFormat;

/// Encode `image` as `format` and write it to `path`.
///
/// The file is only created once encoding has succeeded.
pub fn save(
    image: &PixelBuffer,
    path: impl AsRef<Path>,
    format: ImageFormat,
    options: &EncodeOptions,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(image, format, options)?;

    fs::write(path, &bytes).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "saved {}x{} {} to {} ({} bytes)",
        image.width(),
        image.height(),
        format,
        path.display(),
        bytes.len()
    );
    Ok(())
}

/// Read and decode the image at `path`.
///
/// The format comes from the file extension; files without a recognised
/// extension are sniffed from their contents.
pub fn open(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let image = match ImageFormat::from_path(path) {
        Ok(format) => decode_with(&bytes, format, options)?,
        Err(_) => decode_guessed(&bytes, options)?,
    };

    debug!(
        "opened {} -> {}x{} {:?}",
        path.display(),
        image.width(),
        image.height(),
        image.format()
    );
    Ok(image)
}
