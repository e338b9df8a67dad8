use std::path::PathBuf;

use crate::gemini::error::ApiErrorKind;

/// Convenience result type used across nanobanana.
pub type NanobananaResult<T> = Result<T, NanobananaError>;

/// Top-level error taxonomy for local image operations and remote generation.
#[derive(thiserror::Error, Debug)]
pub enum NanobananaError {
    /// A transform request without any operation set.
    #[error("no transformation specified (use resize, crop, rotate, flip or flop)")]
    NoOperation,

    /// Malformed or out-of-bounds crop region.
    #[error("invalid crop: {0}")]
    InvalidCrop(String),

    /// Malformed resize spec or a spec that resolves to a zero dimension.
    #[error("invalid size: {0}")]
    InvalidSize(String),

    /// Unknown fit mode.
    #[error("invalid fit mode: {0} (use: cover, contain, fill, inside, outside)")]
    InvalidFit(String),

    /// Rotation outside of [-360, 360].
    #[error("invalid rotation: {0} (must be between -360 and 360 degrees)")]
    InvalidRotation(f64),

    /// Unknown layout direction.
    #[error("invalid direction: {0} (use: horizontal, vertical, grid)")]
    InvalidDirection(String),

    /// Color that is neither a known name nor `#RRGGBB`.
    #[error("invalid color: {0} (expected white, black or #RRGGBB)")]
    InvalidColor(String),

    /// Tolerance outside of 0..=100.
    #[error("invalid tolerance: {0} (must be between 0 and 100)")]
    InvalidTolerance(u32),

    /// Composition needs at least two inputs.
    #[error("not enough images: at least 2 are required, got {0}")]
    NotEnoughImages(usize),

    /// Any other invalid user-provided parameter.
    #[error("validation error: {0}")]
    Validation(String),

    /// Input path does not exist.
    #[error("input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Input could not be read or decoded as an image.
    #[error("failed to open image '{}': {source}", path.display())]
    Decode {
        /// Offending input path.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Output could not be encoded or written.
    #[error("failed to save image '{}': {source}", path.display())]
    Encode {
        /// Offending output path.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: image::ImageError,
    },

    /// Filesystem failure outside of image encode/decode.
    #[error("io error on '{}': {source}", path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Output extension that maps to no known image format.
    #[error("unsupported output format for '{}'", .0.display())]
    UnsupportedFormat(PathBuf),

    /// No API key was configured.
    #[error("no API key provided")]
    MissingApiKey,

    /// Classified failure from the remote generation API.
    #[error("[{}] {message}", kind.code())]
    Api {
        /// Closed classification of the failure.
        kind: ApiErrorKind,
        /// Human readable detail.
        message: String,
    },

    /// The API answered but returned no image parts.
    #[error("no images generated")]
    NoImageGenerated,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NanobananaError {
    /// Build a [`NanobananaError::InvalidCrop`] value.
    pub fn invalid_crop(msg: impl Into<String>) -> Self {
        Self::InvalidCrop(msg.into())
    }

    /// Build a [`NanobananaError::InvalidSize`] value.
    pub fn invalid_size(msg: impl Into<String>) -> Self {
        Self::InvalidSize(msg.into())
    }

    /// Build a [`NanobananaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a classified [`NanobananaError::Api`] value from raw error text.
    pub fn api(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = crate::gemini::error::classify_api_error(&raw);
        let message = match kind {
            ApiErrorKind::ApiError => raw,
            other => other.default_message().to_string(),
        };
        Self::Api { kind, message }
    }

    /// Stable machine-readable code, used for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoOperation => "NO_OPERATION",
            Self::InvalidCrop(_) => "INVALID_CROP",
            Self::InvalidSize(_) => "INVALID_SIZE",
            Self::InvalidFit(_) => "INVALID_FIT",
            Self::InvalidRotation(_) => "INVALID_ROTATION",
            Self::InvalidDirection(_) => "INVALID_DIRECTION",
            Self::InvalidColor(_) => "INVALID_COLOR",
            Self::InvalidTolerance(_) => "INVALID_TOLERANCE",
            Self::NotEnoughImages(_) => "NOT_ENOUGH_IMAGES",
            Self::Validation(_) => "INVALID_INPUT",
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::Decode { .. } => "DECODE_FAILED",
            Self::Encode { .. } => "SAVE_FAILED",
            Self::Io { .. } => "IO_ERROR",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::MissingApiKey => "MISSING_API_KEY",
            Self::Api { kind, .. } => kind.code(),
            Self::NoImageGenerated => "NO_IMAGE_GENERATED",
            Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Optional follow-up suggestion shown next to the error.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NoOperation => Some("Use --resize, --crop, --rotate, --flip, or --flop"),
            Self::NotEnoughImages(_) => {
                Some("Provide multiple image paths or use glob patterns like *.png")
            }
            Self::InvalidDirection(_) => Some("Use: horizontal, vertical, or grid"),
            Self::MissingApiKey => {
                Some("Set GEMINI_API_KEY environment variable or use --api-key flag")
            }
            Self::NoImageGenerated => Some("Try rephrasing your prompt"),
            Self::Api { kind, .. } => kind.hint(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
