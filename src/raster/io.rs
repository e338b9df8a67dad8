use std::path::Path;

use anyhow::Context as _;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, RgbaImage};

use crate::foundation::error::{NanobananaError, NanobananaResult};

/// Open and decode an image file, reporting the detected format.
#[tracing::instrument(level = "debug")]
pub fn open_image(path: &Path) -> NanobananaResult<(DynamicImage, Option<ImageFormat>)> {
    if !path.exists() {
        return Err(NanobananaError::FileNotFound(path.to_path_buf()));
    }

    let decode_err = |source: ImageError| NanobananaError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| decode_err(ImageError::IoError(e)))?;
    let format = reader.format();
    let img = reader.decode().map_err(decode_err)?;

    tracing::debug!(
        width = img.width(),
        height = img.height(),
        ?format,
        "decoded image"
    );
    Ok((img, format))
}

/// Resolve the output format from a path's extension.
pub fn format_from_path(path: &Path) -> NanobananaResult<ImageFormat> {
    ImageFormat::from_path(path).map_err(|_| NanobananaError::UnsupportedFormat(path.to_path_buf()))
}

/// Short lowercase name for a format (`png`, `jpeg`, `gif`, ...).
pub fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        other => other.extensions_str().first().copied().unwrap_or("unknown"),
    }
}

pub fn ensure_parent_dir(path: &Path) -> NanobananaResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Encode `img` to `path` in `format`, creating parent directories.
///
/// Formats without an alpha channel get the color channels only.
#[tracing::instrument(level = "debug", skip(img), fields(width = img.width(), height = img.height()))]
pub fn save_rgba(img: &RgbaImage, path: &Path, format: ImageFormat) -> NanobananaResult<()> {
    ensure_parent_dir(path)?;

    let encode_err = |source: ImageError| NanobananaError::Encode {
        path: path.to_path_buf(),
        source,
    };
    if matches!(format, ImageFormat::Jpeg | ImageFormat::Pnm) {
        DynamicImage::ImageRgba8(img.clone())
            .to_rgb8()
            .save_with_format(path, format)
            .map_err(encode_err)
    } else {
        img.save_with_format(path, format).map_err(encode_err)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/io.rs"]
mod tests;
