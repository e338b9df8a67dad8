//! Target-size parsing and fit-mode resizing.

use std::str::FromStr;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::foundation::error::{NanobananaError, NanobananaResult};

/// Requested output size, before fit-mode reconciliation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeSpec {
    /// `WxH` in pixels.
    Exact { width: u32, height: u32 },
    /// `P%` of the source dimensions.
    Percent(f64),
}

impl ResizeSpec {
    /// Parse `WxH` (case-insensitive `x`) or `P%`.
    pub fn parse(spec: &str) -> NanobananaResult<Self> {
        let spec = spec.trim();
        if let Some(pct) = spec.strip_suffix('%') {
            let p: f64 = pct
                .trim()
                .parse()
                .map_err(|_| NanobananaError::invalid_size(format!("invalid percentage '{spec}'")))?;
            if !p.is_finite() || p <= 0.0 {
                return Err(NanobananaError::invalid_size(format!(
                    "percentage must be positive, got '{spec}'"
                )));
            }
            return Ok(Self::Percent(p));
        }

        let lower = spec.to_ascii_lowercase();
        let Some((w, h)) = lower.split_once('x') else {
            return Err(NanobananaError::invalid_size(format!(
                "'{spec}', expected WxH or N%"
            )));
        };
        let dim = |s: &str| {
            s.trim()
                .parse::<u32>()
                .map_err(|_| NanobananaError::invalid_size(format!("invalid dimension '{s}' in '{spec}'")))
        };
        let (width, height) = (dim(w)?, dim(h)?);
        if width == 0 || height == 0 {
            return Err(NanobananaError::invalid_size(format!(
                "dimensions must be positive, got '{spec}'"
            )));
        }
        Ok(Self::Exact { width, height })
    }

    /// Resolve against the source dimensions.
    pub fn target_for(&self, src_w: u32, src_h: u32) -> NanobananaResult<(u32, u32)> {
        let (w, h) = match *self {
            Self::Exact { width, height } => (width, height),
            Self::Percent(p) => {
                let scale = |v: u32| (f64::from(v) * p / 100.0).floor().min(f64::from(u32::MAX)) as u32;
                (scale(src_w), scale(src_h))
            }
        };
        if w == 0 || h == 0 {
            return Err(NanobananaError::invalid_size(format!(
                "resize resolves to {w}x{h}"
            )));
        }
        Ok((w, h))
    }
}

impl FromStr for ResizeSpec {
    type Err = NanobananaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// How to reconcile the source aspect ratio with the target box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FitMode {
    Fill,
    /// Also spelled `inside`.
    #[default]
    Contain,
    Cover,
    Outside,
}

impl FitMode {
    pub fn parse(s: &str) -> NanobananaResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fill" => Ok(Self::Fill),
            "" | "contain" | "inside" => Ok(Self::Contain),
            "cover" => Ok(Self::Cover),
            "outside" => Ok(Self::Outside),
            _ => Err(NanobananaError::InvalidFit(s.to_string())),
        }
    }
}

impl FromStr for FitMode {
    type Err = NanobananaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Dimensions the source is scaled to before any cropping.
///
/// `Contain` never enlarges a source that already fits. For `Cover` the
/// result covers the box and is cropped afterwards.
pub fn scaled_dimensions(src: (u32, u32), target: (u32, u32), fit: FitMode) -> (u32, u32) {
    let (sw, sh) = (u64::from(src.0.max(1)), u64::from(src.1.max(1)));
    let (tw, th) = target;
    // Width-limited when sw/sh >= tw/th.
    let wider = sw * u64::from(th) >= u64::from(tw) * sh;

    let match_width = || (tw, scale_side(sh, sw, tw));
    let match_height = || (scale_side(sw, sh, th), th);

    match fit {
        FitMode::Fill => target,
        FitMode::Contain => {
            if src.0 <= tw && src.1 <= th {
                src
            } else if wider {
                let (w, h) = match_width();
                (w, h.min(th))
            } else {
                let (w, h) = match_height();
                (w.min(tw), h)
            }
        }
        FitMode::Cover => {
            if wider {
                let (w, h) = match_height();
                (w.max(tw), h)
            } else {
                let (w, h) = match_width();
                (w, h.max(th))
            }
        }
        FitMode::Outside => {
            // Equal aspect ratios match the width.
            if sw * u64::from(th) > u64::from(tw) * sh {
                match_height()
            } else {
                match_width()
            }
        }
    }
}

/// `other * target / side`, rounded, at least 1.
fn scale_side(other: u64, side: u64, target: u32) -> u32 {
    let v = (other as f64 * f64::from(target) / side as f64).round();
    v.clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Resize `img` towards `target` under `fit`, always with Lanczos3.
#[tracing::instrument(level = "debug", skip(img), fields(src_w = img.width(), src_h = img.height()))]
pub fn resize(img: &RgbaImage, target: (u32, u32), fit: FitMode) -> RgbaImage {
    let (nw, nh) = scaled_dimensions(img.dimensions(), target, fit);
    let scaled = imageops::resize(img, nw, nh, FilterType::Lanczos3);

    if fit != FitMode::Cover {
        return scaled;
    }
    let (tw, th) = target;
    let x = (nw - tw) / 2;
    let y = (nh - th) / 2;
    imageops::crop_imm(&scaled, x, y, tw, th).to_image()
}

#[cfg(test)]
#[path = "../../tests/unit/transform/resize.rs"]
mod tests;
