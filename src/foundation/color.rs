use image::Rgb;

use crate::foundation::error::{NanobananaError, NanobananaResult};

/// Pure white.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
/// Pure black.
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Parse `white`, `black` (case-insensitive) or a `#RRGGBB` hex color.
pub fn parse_color(s: &str) -> NanobananaResult<Rgb<u8>> {
    match s.trim().to_ascii_lowercase().as_str() {
        "white" => Ok(WHITE),
        "black" => Ok(BLACK),
        _ => parse_hex_rgb(s),
    }
}

/// Parse exactly six hex digits with an optional leading `#`.
pub fn parse_hex_rgb(s: &str) -> NanobananaResult<Rgb<u8>> {
    let raw = s.trim();
    let hex = raw.strip_prefix('#').unwrap_or(raw);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(NanobananaError::InvalidColor(s.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| NanobananaError::InvalidColor(s.to_string()))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// Human label for a color: `white`, `black` or `#RRGGBB`.
pub fn color_label(c: Rgb<u8>) -> String {
    match c {
        WHITE => "white".to_string(),
        BLACK => "black".to_string(),
        Rgb([r, g, b]) => format!("#{r:02X}{g:02X}{b:02X}"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
