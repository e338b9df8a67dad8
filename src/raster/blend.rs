//! Alpha-over compositing on premultiplied RGBA8 buffers.
//!
//! Decoded rasters are straight (non-premultiplied) RGBA. Compositing converts
//! sources and the canvas to premultiplied space, blends there, then converts
//! the canvas back before encoding.

use image::RgbaImage;

pub type PremulRgba8 = [u8; 4];

/// Source-over for a single premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite `src` onto `dst` with its top-left corner at `(x, y)`.
///
/// Both buffers must already be premultiplied. Pixels falling outside `dst`
/// are skipped.
pub fn draw_over(dst: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    let (dw, dh) = dst.dimensions();
    for (sx, sy, px) in src.enumerate_pixels() {
        let (tx, ty) = (x + sx, y + sy);
        if tx >= dw || ty >= dh {
            continue;
        }
        let d = dst.get_pixel_mut(tx, ty);
        d.0 = over(d.0, px.0);
    }
}

pub fn premultiply_in_place(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let a = u16::from(px[3]);
        if a == 0 {
            px.0 = [0, 0, 0, 0];
            continue;
        }
        for c in 0..3 {
            px[c] = mul_div255(u16::from(px[c]), a);
        }
    }
}

pub fn unpremultiply_in_place(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in 0..3 {
            let v = (u32::from(px[c]) * 255 + a / 2) / a;
            px[c] = v.min(255) as u8;
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blend.rs"]
mod tests;
