//! Rotation about the image center.
//!
//! Positive angles rotate counter-clockwise. Exact quarter turns are pixel
//! reorders; any other angle expands the canvas to the rotated bounds and
//! resamples with bilinear interpolation, leaving uncovered areas
//! transparent.
//!
//! Inverse mapping, with `(dx, dy)` relative to the destination center in
//! y-down coordinates:
//! ```text
//! src_x = dx * cos(θ) - dy * sin(θ) + src_cx
//! src_y = dx * sin(θ) + dy * cos(θ) + src_cy
//! ```

use image::RgbaImage;
use image::imageops;

use crate::raster::blend::{premultiply_in_place, unpremultiply_in_place};

const ANGLE_EPS: f64 = 1e-3;

enum QuarterTurn {
    None,
    Ccw90,
    Half,
    Cw90,
}

fn quarter_turn(angle_degrees: f64) -> Option<QuarterTurn> {
    let a = angle_degrees.rem_euclid(360.0);
    let near = |target: f64| (a - target).abs() < ANGLE_EPS;
    if near(0.0) || near(360.0) {
        Some(QuarterTurn::None)
    } else if near(90.0) {
        Some(QuarterTurn::Ccw90)
    } else if near(180.0) {
        Some(QuarterTurn::Half)
    } else if near(270.0) {
        Some(QuarterTurn::Cw90)
    } else {
        None
    }
}

/// Bounding box of a `width`x`height` rectangle rotated by `angle_degrees`.
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turn(angle_degrees) {
        Some(QuarterTurn::None | QuarterTurn::Half) => return (width, height),
        Some(QuarterTurn::Ccw90 | QuarterTurn::Cw90) => return (height, width),
        None => {}
    }

    let rad = angle_degrees.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    let (w, h) = (f64::from(width), f64::from(height));
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;
    (new_w.max(1), new_h.max(1))
}

/// Rotate counter-clockwise by `angle_degrees`.
#[tracing::instrument(level = "debug", skip(img), fields(width = img.width(), height = img.height()))]
pub fn rotate(img: &RgbaImage, angle_degrees: f64) -> RgbaImage {
    match quarter_turn(angle_degrees) {
        Some(QuarterTurn::None) => return img.clone(),
        // `imageops::rotate90` turns clockwise.
        Some(QuarterTurn::Ccw90) => return imageops::rotate270(img),
        Some(QuarterTurn::Half) => return imageops::rotate180(img),
        Some(QuarterTurn::Cw90) => return imageops::rotate90(img),
        None => {}
    }

    let (src_w, src_h) = img.dimensions();
    let (dst_w, dst_h) = rotated_bounds(src_w, src_h, angle_degrees);

    // Interpolate in premultiplied space so transparent neighbours do not
    // bleed their color into edges.
    let mut src = img.clone();
    premultiply_in_place(&mut src);

    let rad = angle_degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    let src_cx = f64::from(src_w) / 2.0;
    let src_cy = f64::from(src_h) / 2.0;
    let dst_cx = f64::from(dst_w) / 2.0;
    let dst_cy = f64::from(dst_h) / 2.0;

    let mut out = RgbaImage::from_fn(dst_w, dst_h, |x, y| {
        // Sample at pixel centers.
        let dx = f64::from(x) + 0.5 - dst_cx;
        let dy = f64::from(y) + 0.5 - dst_cy;
        let sx = dx * cos - dy * sin + src_cx - 0.5;
        let sy = dx * sin + dy * cos + src_cy - 0.5;
        image::Rgba(sample_bilinear(&src, sx, sy))
    });
    unpremultiply_in_place(&mut out);
    out
}

/// Bilinear sample; neighbours outside the image count as transparent.
fn sample_bilinear(img: &RgbaImage, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (i64::from(img.width()), i64::from(img.height()));
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    if x0 < -1 || y0 < -1 || x0 >= w || y0 >= h {
        return [0; 4];
    }

    let fetch = |px: i64, py: i64| -> [f64; 4] {
        if px < 0 || py < 0 || px >= w || py >= h {
            return [0.0; 4];
        }
        let p = img.get_pixel(px as u32, py as u32).0;
        [
            f64::from(p[0]),
            f64::from(p[1]),
            f64::from(p[2]),
            f64::from(p[3]),
        ]
    };

    let p00 = fetch(x0, y0);
    let p10 = fetch(x0 + 1, y0);
    let p01 = fetch(x0, y0 + 1);
    let p11 = fetch(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/transform/rotation.rs"]
mod tests;
