//! Single-image transform pipeline.
//!
//! Operations run in a fixed order: crop, resize, rotate, flip (vertical),
//! flop (horizontal). Unset operations are skipped.

use std::path::Path;

use image::{DynamicImage, RgbaImage, imageops};
use serde::Serialize;

use crate::foundation::error::{NanobananaError, NanobananaResult};
use crate::raster;

pub mod crop;
pub mod resize;
pub mod rotation;

pub use crop::CropRegion;
pub use resize::{FitMode, ResizeSpec};
pub use rotation::{rotate, rotated_bounds};

/// Operations to apply to one image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformRequest {
    pub crop: Option<CropRegion>,
    pub resize: Option<ResizeSpec>,
    pub fit: FitMode,
    /// Counter-clockwise degrees; 0 means no rotation.
    pub rotate: f64,
    pub flip: bool,
    pub flop: bool,
}

impl TransformRequest {
    /// Build a request from textual specs as given on the command line.
    pub fn from_specs(
        resize: Option<&str>,
        fit: &str,
        crop: Option<&str>,
        rotate: f64,
        flip: bool,
        flop: bool,
    ) -> NanobananaResult<Self> {
        Ok(Self {
            crop: non_empty(crop).map(CropRegion::parse).transpose()?,
            resize: non_empty(resize).map(ResizeSpec::parse).transpose()?,
            fit: FitMode::parse(fit)?,
            rotate,
            flip,
            flop,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.crop.is_none() && self.resize.is_none() && self.rotate == 0.0 && !self.flip && !self.flop
    }

    pub fn validate(&self) -> NanobananaResult<()> {
        if self.is_empty() {
            return Err(NanobananaError::NoOperation);
        }
        if !self.rotate.is_finite() || !(-360.0..=360.0).contains(&self.rotate) {
            return Err(NanobananaError::InvalidRotation(self.rotate));
        }
        Ok(())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Outcome of [`transform_file`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransformResult {
    pub width: u32,
    pub height: u32,
    pub format: String,
}

/// Apply `req` to `img`, returning a new raster.
#[tracing::instrument(level = "debug", skip(img), fields(width = img.width(), height = img.height()))]
pub fn transform_image(img: &DynamicImage, req: &TransformRequest) -> NanobananaResult<RgbaImage> {
    req.validate()?;

    let mut out = img.to_rgba8();

    if let Some(region) = &req.crop {
        out = region.apply(&out)?;
        tracing::debug!(?region, "cropped");
    }

    if let Some(spec) = &req.resize {
        let target = spec.target_for(out.width(), out.height())?;
        out = resize::resize(&out, target, req.fit);
        tracing::debug!(?target, fit = ?req.fit, w = out.width(), h = out.height(), "resized");
    }

    if req.rotate != 0.0 {
        out = rotation::rotate(&out, req.rotate);
    }

    if req.flip {
        imageops::flip_vertical_in_place(&mut out);
    }
    if req.flop {
        imageops::flip_horizontal_in_place(&mut out);
    }

    Ok(out)
}

/// Load `input`, transform it and save to `output` in the format implied by
/// its extension.
#[tracing::instrument(level = "debug", skip(req))]
pub fn transform_file(
    input: &Path,
    output: &Path,
    req: &TransformRequest,
) -> NanobananaResult<TransformResult> {
    req.validate()?;
    let format = raster::format_from_path(output)?;

    let (img, _) = raster::open_image(input)?;
    let out = transform_image(&img, req)?;
    raster::save_rgba(&out, output, format)?;

    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| raster::format_name(format).to_string());

    tracing::info!(output = %output.display(), width = out.width(), height = out.height(), "transformed");
    Ok(TransformResult {
        width: out.width(),
        height: out.height(),
        format: ext,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/transform/mod.rs"]
mod tests;
