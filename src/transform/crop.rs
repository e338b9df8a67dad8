//! Pixel-space cropping.
//!
//! A crop spec is `left,top,width,height` in pixels. Unlike a clamped crop,
//! a region that does not fit inside the image is rejected.

use std::str::FromStr;

use image::RgbaImage;

use crate::foundation::error::{NanobananaError, NanobananaResult};

/// Rectangle to extract, in source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRegion {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// Parse `left,top,width,height`.
    pub fn parse(spec: &str) -> NanobananaResult<Self> {
        let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(NanobananaError::invalid_crop(format!(
                "'{spec}', expected: left,top,width,height"
            )));
        }

        let field = |idx: usize, name: &str| {
            parts[idx].parse::<u32>().map_err(|_| {
                NanobananaError::invalid_crop(format!("invalid {name} value '{}'", parts[idx]))
            })
        };
        Ok(Self {
            left: field(0, "left")?,
            top: field(1, "top")?,
            width: field(2, "width")?,
            height: field(3, "height")?,
        })
    }

    /// Extract the region into a new raster.
    pub fn apply(&self, img: &RgbaImage) -> NanobananaResult<RgbaImage> {
        if self.width == 0 || self.height == 0 {
            return Err(NanobananaError::invalid_crop(
                "width and height must be greater than zero",
            ));
        }

        let (w, h) = img.dimensions();
        let right = self.left.checked_add(self.width);
        let bottom = self.top.checked_add(self.height);
        let fits = matches!((right, bottom), (Some(r), Some(b)) if r <= w && b <= h);
        if !fits {
            return Err(NanobananaError::invalid_crop(format!(
                "region {}x{}+{}+{} exceeds image bounds {w}x{h}",
                self.width, self.height, self.left, self.top
            )));
        }

        Ok(image::imageops::crop_imm(img, self.left, self.top, self.width, self.height).to_image())
    }
}

impl FromStr for CropRegion {
    type Err = NanobananaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/crop.rs"]
mod tests;
