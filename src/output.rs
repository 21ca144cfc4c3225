//! # Output Module
//!
//! Writes the rendered 8-bit image to disk.
//!
//! The encoder is chosen from the output file's extension and must be a
//! lossless raster format. Encoding goes to a temporary file beside the
//! destination, which is renamed over the target only once the whole image
//! has been written, so a failed render never leaves a truncated file.
//! The staged file takes the permissions of the file it replaces, or
//! `0644` for a new file on unix.

use std::fs::{self, Permissions};
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error::{Result, TraceError};

/// Lossless formats an image may be written as.
const LOSSLESS_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::Tga,
];

/// Pick the encoder for `path` from its extension.
///
/// # Errors
///
/// [`TraceError::UnsupportedFormat`] when the extension is missing, unknown,
/// or names a lossy format such as JPEG.
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    match ImageFormat::from_path(path) {
        Ok(format) if LOSSLESS_FORMATS.contains(&format) => Ok(format),
        _ => Err(TraceError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Permissions the written image should carry.
///
/// An existing destination keeps its mode. Temporary files are created
/// owner-only, so a fresh output is opened up to `0644`.
fn output_permissions(path: &Path) -> Option<Permissions> {
    if let Ok(meta) = fs::metadata(path) {
        return Some(meta.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

/// Save an 8-bit RGBA image to `path`, replacing any existing file.
///
/// # Errors
///
/// Fails on an unsupported extension, an unwritable directory, or an
/// encoder error. In every case the destination is left untouched.
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<()> {
    let format = output_format(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staging = NamedTempFile::new_in(dir)?;
    debug!("Encoding {:?} image via {}", format, staging.path().display());

    {
        let mut writer = BufWriter::new(staging.as_file_mut());
        image
            .write_to(&mut writer, format)
            .map_err(|source| TraceError::ImageWrite {
                path: path.to_path_buf(),
                source,
            })?;
        writer.flush()?;
    }

    if let Some(permissions) = output_permissions(path) {
        staging.as_file().set_permissions(permissions)?;
    }
    staging.persist(path).map_err(|e| TraceError::Io(e.error))?;
    info!("Image saved as {}", path.display());
    Ok(())
}
