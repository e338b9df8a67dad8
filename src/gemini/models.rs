use crate::foundation::error::{NanobananaError, NanobananaResult};

/// Fast image model.
pub const MODEL_FLASH: &str = "gemini-2.5-flash-image-preview";
/// Higher quality image model; the only one that accepts `4K`.
pub const MODEL_PRO: &str = "gemini-3-pro-image-preview";

pub const ASPECT_RATIOS: &[&str] = &[
    "1:1", "3:2", "2:3", "3:4", "4:3", "4:5", "5:4", "9:16", "16:9", "21:9",
];

pub const RESOLUTIONS: &[&str] = &["1K", "2K", "4K"];

pub const MAX_IMAGE_COUNT: u32 = 10;

pub fn is_valid_aspect_ratio(ratio: &str) -> bool {
    ASPECT_RATIOS.contains(&ratio)
}

pub fn is_valid_resolution(resolution: &str) -> bool {
    RESOLUTIONS.contains(&resolution)
}

/// Map `flash`/`pro` aliases to model ids; other names pass through.
pub fn resolve_model_name(name: &str) -> &str {
    match name {
        "" | "flash" => MODEL_FLASH,
        "pro" => MODEL_PRO,
        other => other,
    }
}

/// Per-request generation settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageConfig {
    pub aspect_ratio: String,
    /// `1K`, `2K` or `4K`; empty leaves it to the model.
    pub resolution: String,
    pub count: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: "1:1".to_string(),
            resolution: String::new(),
            count: 1,
        }
    }
}

impl ImageConfig {
    /// Check the settings against the resolved `model` id.
    pub fn validate(&self, model: &str) -> NanobananaResult<()> {
        if !(1..=MAX_IMAGE_COUNT).contains(&self.count) {
            return Err(NanobananaError::validation(format!(
                "count must be between 1 and {MAX_IMAGE_COUNT}, got {}",
                self.count
            )));
        }
        if !self.aspect_ratio.is_empty() && !is_valid_aspect_ratio(&self.aspect_ratio) {
            return Err(NanobananaError::validation(format!(
                "invalid aspect ratio '{}' (valid: {})",
                self.aspect_ratio,
                ASPECT_RATIOS.join(", ")
            )));
        }
        if !self.resolution.is_empty() {
            if !is_valid_resolution(&self.resolution) {
                return Err(NanobananaError::validation(format!(
                    "invalid resolution '{}' (valid: {})",
                    self.resolution,
                    RESOLUTIONS.join(", ")
                )));
            }
            if self.resolution == "4K" && model != MODEL_PRO {
                return Err(NanobananaError::validation(
                    "4K resolution requires the pro model (-m pro)",
                ));
            }
        }
        Ok(())
    }
}

/// Nominal output size for an aspect ratio, used for reporting.
pub fn estimate_dimensions(ratio: &str) -> (u32, u32) {
    match ratio {
        "16:9" => (1024, 576),
        "9:16" => (576, 1024),
        "4:3" => (1024, 768),
        "3:4" => (768, 1024),
        "3:2" => (1024, 683),
        "2:3" => (683, 1024),
        "4:5" => (819, 1024),
        "5:4" => (1024, 819),
        "21:9" => (1024, 439),
        _ => (1024, 1024),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gemini/models.rs"]
mod tests;
