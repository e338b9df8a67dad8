//! Multi-image composition onto a single canvas.

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use serde::Serialize;

use crate::foundation::color::parse_color;
use crate::foundation::error::{NanobananaError, NanobananaResult};
use crate::raster::{self, blend};

pub mod layout;

pub use layout::{Align, Direction, Layout, grid_columns, layout_offsets};

/// Canvas fill behind the composited images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Background {
    #[default]
    Transparent,
    Solid([u8; 3]),
}

impl Background {
    /// `transparent`, `white`, `black` or hex. Anything unparseable is
    /// transparent.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("transparent") {
            return Self::Transparent;
        }
        parse_color(s).map_or(Self::Transparent, |c| Self::Solid(c.0))
    }

    fn pixel(self) -> Rgba<u8> {
        match self {
            Self::Transparent => Rgba([0, 0, 0, 0]),
            Self::Solid([r, g, b]) => Rgba([r, g, b, 255]),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombineOptions {
    pub direction: Direction,
    pub gap: u32,
    /// Grid columns; 0 picks automatically.
    pub columns: u32,
    pub align: Align,
    pub background: Background,
}

impl CombineOptions {
    /// Build options from their textual forms. Only the direction can fail.
    pub fn from_specs(
        direction: &str,
        gap: u32,
        columns: u32,
        align: &str,
        background: &str,
    ) -> NanobananaResult<Self> {
        Ok(Self {
            direction: Direction::parse(direction)?,
            gap,
            columns,
            align: Align::parse(align),
            background: Background::parse(background),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CombineResult {
    pub width: u32,
    pub height: u32,
    pub format: String,
}

/// Lay out and alpha-composite `images` onto a new canvas.
#[tracing::instrument(level = "debug", skip(images), fields(count = images.len()))]
pub fn combine_images(images: &[RgbaImage], opts: &CombineOptions) -> NanobananaResult<RgbaImage> {
    if images.len() < 2 {
        return Err(NanobananaError::NotEnoughImages(images.len()));
    }

    let sizes: Vec<(u32, u32)> = images.iter().map(RgbaImage::dimensions).collect();
    let Layout { canvas, offsets } =
        layout_offsets(&sizes, opts.direction, opts.gap, opts.columns, opts.align)?;
    tracing::debug!(?canvas, direction = ?opts.direction, "layout");

    let mut out = RgbaImage::from_pixel(canvas.0, canvas.1, opts.background.pixel());
    blend::premultiply_in_place(&mut out);
    for (img, &(x, y)) in images.iter().zip(&offsets) {
        let mut src = img.clone();
        blend::premultiply_in_place(&mut src);
        blend::draw_over(&mut out, &src, x, y);
    }
    blend::unpremultiply_in_place(&mut out);

    Ok(out)
}

/// Load `inputs` in order, combine them and write a PNG to `output`.
#[tracing::instrument(level = "debug", skip(inputs, opts), fields(count = inputs.len()))]
pub fn combine_files(
    inputs: &[PathBuf],
    output: &Path,
    opts: &CombineOptions,
) -> NanobananaResult<CombineResult> {
    if inputs.len() < 2 {
        return Err(NanobananaError::NotEnoughImages(inputs.len()));
    }

    let images = inputs
        .iter()
        .map(|p| raster::open_image(p).map(|(img, _)| img.to_rgba8()))
        .collect::<NanobananaResult<Vec<_>>>()?;

    let out = combine_images(&images, opts)?;
    raster::save_rgba(&out, output, ImageFormat::Png)?;

    tracing::info!(output = %output.display(), width = out.width(), height = out.height(), "combined");
    Ok(CombineResult {
        width: out.width(),
        height: out.height(),
        format: "png".to_string(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/mod.rs"]
mod tests;
