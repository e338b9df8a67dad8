//! Nanobanana generates images with Gemini's image models and post-processes
//! them locally.
//!
//! # Pieces
//!
//! 1. **Generation** ([`gemini`]): prompt (plus an optional input image) in,
//!    encoded image bytes out. Remote failures are classified into a closed
//!    [`ApiErrorKind`].
//! 2. **Transform** ([`transform`]): crop, resize with a fit mode, rotate,
//!    flip and flop, always in that order.
//! 3. **Composition** ([`compose`], [`transparency`]): row/column/grid
//!    layouts with alpha-over blending, chroma-key background removal and
//!    transparency inspection.
//!
//! Pixel routines are pure functions over [`image::RgbaImage`]; the `*_file`
//! wrappers handle decode and encode. Inputs are never mutated.
#![forbid(unsafe_code)]

pub mod compose;
pub mod config;
pub mod foundation;
pub mod gemini;
pub mod output;
pub mod raster;
pub mod transform;
pub mod transparency;

pub use compose::{
    Align, Background, CombineOptions, CombineResult, Direction, combine_files, combine_images,
};
pub use config::Config;
pub use foundation::error::{NanobananaError, NanobananaResult};
pub use gemini::{ApiErrorKind, GeminiClient, GeneratedImage, ImageConfig, classify_api_error};
pub use transform::{
    CropRegion, FitMode, ResizeSpec, TransformRequest, TransformResult, transform_file,
    transform_image,
};
pub use transparency::{
    InspectionResult, TransparencyOptions, TransparencyResult, inspect_file, inspect_image,
    make_transparent, make_transparent_file,
};
