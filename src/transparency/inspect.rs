use std::collections::HashMap;
use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb};
use serde::Serialize;

use crate::foundation::color::color_label;
use crate::foundation::error::NanobananaResult;
use crate::raster;

/// Transparency report for one image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InspectionResult {
    pub has_alpha_channel: bool,
    pub transparent_pixel_percent: f64,
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub dominant_background_color: String,
    pub recommendation: String,
}

/// Scan `img` once for alpha usage and the dominant edge color.
pub fn inspect_image(img: &DynamicImage, format: Option<ImageFormat>) -> InspectionResult {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let mut has_alpha = false;
    let mut transparent = 0u64;
    // color -> (count, first seen)
    let mut edge_counts: HashMap<[u8; 3], (u64, usize)> = HashMap::new();

    for (x, y, px) in rgba.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        if a < 255 {
            has_alpha = true;
            if a < 128 {
                transparent += 1;
            }
        }
        if x == 0 || y == 0 || x + 1 == w || y + 1 == h {
            let seen = edge_counts.len();
            edge_counts.entry([r, g, b]).or_insert((0, seen)).0 += 1;
        }
    }

    let dominant = edge_counts
        .iter()
        .max_by(|a, b| a.1.0.cmp(&b.1.0).then(b.1.1.cmp(&a.1.1)))
        .map(|(c, _)| Rgb(*c))
        .unwrap_or(Rgb([0, 0, 0]));
    let dominant_label = color_label(dominant);

    let total = u64::from(w) * u64::from(h);
    let percent = if total == 0 {
        0.0
    } else {
        transparent as f64 / total as f64 * 100.0
    };

    let recommendation = if !has_alpha {
        format!(
            "Image has no alpha channel. Use 'nanobanana transparent make' with --color {dominant_label} to add transparency."
        )
    } else if percent < 1.0 {
        "Image has alpha channel but very few transparent pixels. Background removal may not have been applied."
            .to_string()
    } else {
        "Image already has transparency.".to_string()
    };

    InspectionResult {
        has_alpha_channel: has_alpha,
        transparent_pixel_percent: percent,
        format: format.map(raster::format_name).unwrap_or("unknown").to_string(),
        width: w,
        height: h,
        dominant_background_color: dominant_label,
        recommendation,
    }
}

#[tracing::instrument(level = "debug")]
pub fn inspect_file(path: &Path) -> NanobananaResult<InspectionResult> {
    let (img, format) = raster::open_image(path)?;
    Ok(inspect_image(&img, format))
}

#[cfg(test)]
#[path = "../../tests/unit/transparency/inspect.rs"]
mod tests;
