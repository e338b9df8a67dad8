//! Prompt builders for the icon and pattern commands.

use crate::foundation::error::{NanobananaError, NanobananaResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IconStyle {
    #[default]
    Modern,
    Flat,
    Minimal,
    Detailed,
}

impl IconStyle {
    pub const NAMES: &'static [&'static str] = &["modern", "flat", "minimal", "detailed"];

    pub fn parse(s: &str) -> NanobananaResult<Self> {
        match s {
            "modern" => Ok(Self::Modern),
            "flat" => Ok(Self::Flat),
            "minimal" => Ok(Self::Minimal),
            "detailed" => Ok(Self::Detailed),
            _ => Err(NanobananaError::validation(format!(
                "invalid style '{s}' (valid: {})",
                Self::NAMES.join(", ")
            ))),
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Modern => "modern, clean, contemporary design",
            Self::Flat => "flat design, no gradients, solid colors, simple shapes",
            Self::Minimal => "minimalist, simple, clean lines, limited colors",
            Self::Detailed => "detailed, polished, professional, refined",
        }
    }
}

pub fn build_icon_prompt(subject: &str, style: IconStyle, background: &str) -> String {
    let bg = match background {
        "" | "transparent" => "on a transparent background".to_string(),
        "white" => "on a clean white background".to_string(),
        "black" => "on a black background".to_string(),
        other => format!("on a {other} colored background"),
    };
    format!(
        "Create an icon of {subject}. Style: {}. The icon should be {bg}. Square format, centered, suitable for app icon or UI element.",
        style.description()
    )
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PatternType {
    #[default]
    Seamless,
    Texture,
    Wallpaper,
}

impl PatternType {
    pub const NAMES: &'static [&'static str] = &["seamless", "texture", "wallpaper"];

    pub fn parse(s: &str) -> NanobananaResult<Self> {
        match s {
            "seamless" => Ok(Self::Seamless),
            "texture" => Ok(Self::Texture),
            "wallpaper" => Ok(Self::Wallpaper),
            _ => Err(NanobananaError::validation(format!(
                "invalid type '{s}' (valid: {})",
                Self::NAMES.join(", ")
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seamless => "seamless",
            Self::Texture => "texture",
            Self::Wallpaper => "wallpaper",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Seamless => {
                "a seamless, tileable pattern that can repeat infinitely without visible seams or edges"
            }
            Self::Texture => "a realistic surface texture, detailed material appearance",
            Self::Wallpaper => "a decorative wallpaper pattern, suitable for backgrounds",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternStyle {
    Geometric,
    Organic,
    Abstract,
    Floral,
    Tech,
}

impl PatternStyle {
    pub const NAMES: &'static [&'static str] = &["geometric", "organic", "abstract", "floral", "tech"];

    /// An empty style means none.
    pub fn parse(s: &str) -> NanobananaResult<Option<Self>> {
        let style = match s {
            "" => return Ok(None),
            "geometric" => Self::Geometric,
            "organic" => Self::Organic,
            "abstract" => Self::Abstract,
            "floral" => Self::Floral,
            "tech" => Self::Tech,
            _ => {
                return Err(NanobananaError::validation(format!(
                    "invalid style '{s}' (valid: {})",
                    Self::NAMES.join(", ")
                )));
            }
        };
        Ok(Some(style))
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Geometric => " using geometric shapes, clean lines, and mathematical precision",
            Self::Organic => " with organic, natural, flowing forms",
            Self::Abstract => " in an abstract, artistic, non-representational style",
            Self::Floral => " featuring flowers, leaves, and botanical elements",
            Self::Tech => " with a digital, technological, circuit-like aesthetic",
        }
    }
}

pub fn build_pattern_prompt(subject: &str, kind: PatternType, style: Option<PatternStyle>) -> String {
    let style = style.map(PatternStyle::suffix).unwrap_or("");
    format!(
        "Create {} of {subject}{style}. The pattern should tile seamlessly. High quality, detailed.",
        kind.description()
    )
}

/// Nearest supported aspect ratio for a pattern tile.
pub fn snap_aspect_ratio(width: u32, height: u32) -> &'static str {
    if width == height || height == 0 {
        return "1:1";
    }
    let ratio = f64::from(width) / f64::from(height);
    if ratio > 1.5 {
        "16:9"
    } else if ratio < 0.67 {
        "9:16"
    } else if ratio > 1.2 {
        "4:3"
    } else if ratio < 0.83 {
        "3:4"
    } else {
        "1:1"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gemini/prompt.rs"]
mod tests;
