//! Chroma-key background removal.
//!
//! Pixels whose color is within tolerance of a key color lose their alpha;
//! every other pixel is copied unchanged.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, Rgba, RgbaImage};
use serde::Serialize;

use crate::foundation::color::WHITE;
use crate::foundation::error::{NanobananaError, NanobananaResult};
use crate::raster;

pub mod inspect;

pub use crate::foundation::color::parse_color as parse_key_color;
pub use inspect::{InspectionResult, inspect_file, inspect_image};

pub const DEFAULT_TOLERANCE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransparencyOptions {
    pub color: Rgb<u8>,
    /// Percent, 0..=100.
    pub tolerance: u32,
}

impl Default for TransparencyOptions {
    fn default() -> Self {
        Self {
            color: WHITE,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl TransparencyOptions {
    pub fn from_specs(color: &str, tolerance: u32) -> NanobananaResult<Self> {
        let opts = Self {
            color: parse_key_color(color)?,
            tolerance,
        };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> NanobananaResult<()> {
        if self.tolerance > 100 {
            return Err(NanobananaError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }

    /// Largest distance still treated as a match.
    pub fn threshold(&self) -> f64 {
        f64::from(self.tolerance) / 100.0 * 255.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransparencyResult {
    pub width: u32,
    pub height: u32,
}

/// Mean squared channel difference over RGB.
pub fn color_distance(px: Rgb<u8>, target: Rgb<u8>) -> f64 {
    let sq = |a: u8, b: u8| {
        let d = f64::from(a) - f64::from(b);
        d * d
    };
    (sq(px[0], target[0]) + sq(px[1], target[1]) + sq(px[2], target[2])) / 3.0
}

/// Zero the alpha of every pixel that matches the key color.
#[tracing::instrument(level = "debug", skip(img), fields(width = img.width(), height = img.height()))]
pub fn make_transparent(img: &DynamicImage, opts: &TransparencyOptions) -> NanobananaResult<RgbaImage> {
    opts.validate()?;
    let threshold = opts.threshold();

    let mut out = img.to_rgba8();
    let mut keyed = 0usize;
    for px in out.pixels_mut() {
        let Rgba([r, g, b, _]) = *px;
        if color_distance(Rgb([r, g, b]), opts.color) <= threshold {
            px[3] = 0;
            keyed += 1;
        }
    }

    tracing::debug!(keyed, threshold, "chroma key applied");
    Ok(out)
}

/// `<dir>/<stem>_transparent.png` next to `input`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{stem}_transparent.png"))
}

/// Key out the background of `input` and save a PNG to `output`.
#[tracing::instrument(level = "debug", skip(opts))]
pub fn make_transparent_file(
    input: &Path,
    output: &Path,
    opts: &TransparencyOptions,
) -> NanobananaResult<TransparencyResult> {
    opts.validate()?;
    let (img, _) = raster::open_image(input)?;
    let out = make_transparent(&img, opts)?;
    raster::save_rgba(&out, output, ImageFormat::Png)?;

    tracing::info!(output = %output.display(), "background removed");
    Ok(TransparencyResult {
        width: out.width(),
        height: out.height(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/transparency/mod.rs"]
mod tests;
