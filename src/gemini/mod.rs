//! Remote image generation through the Gemini `generateContent` API.

pub mod client;
pub mod error;
pub mod models;
pub mod prompt;

pub use client::{GeminiClient, GeneratedImage, detect_mime_type, numbered_output_path};
pub use error::{ApiErrorKind, classify_api_error};
pub use models::{ImageConfig, MODEL_FLASH, MODEL_PRO, estimate_dimensions, resolve_model_name};
pub use prompt::{IconStyle, PatternStyle, PatternType, build_icon_prompt, build_pattern_prompt, snap_aspect_ratio};
