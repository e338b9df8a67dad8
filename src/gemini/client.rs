use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::blocking::Client as HttpClient;
use serde_json::{Value, json};

use super::error::ApiErrorKind;
use super::models::ImageConfig;
use crate::foundation::error::{NanobananaError, NanobananaResult};
use crate::raster::ensure_parent_dir;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Encoded image bytes returned by the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl GeneratedImage {
    /// Subtype of the MIME type, e.g. `png`.
    pub fn format(&self) -> &str {
        self.mime_type
            .strip_prefix("image/")
            .unwrap_or(&self.mime_type)
    }

    /// Write the raw bytes to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> NanobananaResult<()> {
        ensure_parent_dir(path)?;
        std::fs::write(path, &self.data).map_err(|source| NanobananaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = self.data.len(), "saved generated image");
        Ok(())
    }
}

/// Blocking client for the `generateContent` endpoint.
pub struct GeminiClient {
    http: HttpClient,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> NanobananaResult<Self> {
        if api_key.trim().is_empty() {
            return Err(NanobananaError::MissingApiKey);
        }
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NanobananaError::Other(anyhow::Error::new(e).context("failed to build HTTP client")))?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API root.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        let model = self.model.trim();
        let path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        };
        format!("{}/{path}:generateContent", self.api_base)
    }

    /// Text-to-image.
    #[tracing::instrument(level = "debug", skip(self, config), fields(model = %self.model))]
    pub fn generate(&self, prompt: &str, config: &ImageConfig) -> NanobananaResult<Vec<GeneratedImage>> {
        let prompt = prompt_with_aspect_ratio(prompt, &config.aspect_ratio);
        let body = build_request_body(&prompt, None, config);
        self.send(&body)
    }

    /// Edit an existing image with a text instruction.
    #[tracing::instrument(level = "debug", skip(self, config), fields(model = %self.model))]
    pub fn edit(
        &self,
        image_path: &Path,
        prompt: &str,
        config: &ImageConfig,
    ) -> NanobananaResult<Vec<GeneratedImage>> {
        let bytes = std::fs::read(image_path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                NanobananaError::FileNotFound(image_path.to_path_buf())
            } else {
                NanobananaError::Io {
                    path: image_path.to_path_buf(),
                    source,
                }
            }
        })?;
        let mime = detect_mime_type(image_path);
        let body = build_request_body(prompt, Some((mime, bytes.as_slice())), config);
        self.send(&body)
    }

    fn send(&self, body: &Value) -> NanobananaResult<Vec<GeneratedImage>> {
        let url = self.endpoint();
        tracing::debug!(%url, "sending generation request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .map_err(|e| NanobananaError::api(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| NanobananaError::api(e.to_string()))?;
        if !status.is_success() {
            return Err(NanobananaError::api(format!("{status}: {}", error_message(&text))));
        }

        let payload: Value = serde_json::from_str(&text)
            .map_err(|e| NanobananaError::api(format!("invalid response body: {e}")))?;
        let images = parse_response(&payload)?;
        tracing::debug!(count = images.len(), "received images");
        Ok(images)
    }
}

/// Append the aspect ratio to the prompt unless it is square or unset.
pub fn prompt_with_aspect_ratio(prompt: &str, aspect_ratio: &str) -> String {
    if aspect_ratio.is_empty() || aspect_ratio == "1:1" {
        prompt.to_string()
    } else {
        format!("{prompt}. Generate this image with {aspect_ratio} aspect ratio.")
    }
}

/// JSON body for `generateContent`; an inline image goes before the text.
pub fn build_request_body(prompt: &str, inline: Option<(&str, &[u8])>, config: &ImageConfig) -> Value {
    let mut parts = Vec::new();
    if let Some((mime, bytes)) = inline {
        parts.push(json!({
            "inlineData": {
                "mimeType": mime,
                "data": BASE64.encode(bytes),
            }
        }));
    }
    parts.push(json!({ "text": prompt }));

    let mut generation = json!({ "responseModalities": ["IMAGE", "TEXT"] });
    if config.count > 1 {
        generation["candidateCount"] = json!(config.count);
    }
    if !config.resolution.is_empty() {
        generation["imageConfig"] = json!({ "imageSize": config.resolution });
    }

    json!({
        "contents": [{ "parts": parts }],
        "generationConfig": generation,
    })
}

/// Collect every `image/*` inline part from a response.
pub fn parse_response(payload: &Value) -> NanobananaResult<Vec<GeneratedImage>> {
    if let Some(reason) = payload
        .pointer("/promptFeedback/blockReason")
        .and_then(Value::as_str)
    {
        tracing::debug!(reason, "prompt blocked");
        return Err(NanobananaError::Api {
            kind: ApiErrorKind::SafetyBlocked,
            message: ApiErrorKind::SafetyBlocked.default_message().to_string(),
        });
    }

    let candidates = payload
        .get("candidates")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut out = Vec::new();
    for part in candidates
        .iter()
        .filter_map(|c| c.pointer("/content/parts").and_then(Value::as_array))
        .flatten()
    {
        let Some(inline) = part.get("inlineData").or_else(|| part.get("inline_data")) else {
            continue;
        };
        let mime = inline
            .get("mimeType")
            .or_else(|| inline.get("mime_type"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        let data = inline.get("data").and_then(Value::as_str).unwrap_or_default();
        if !mime.starts_with("image/") || data.is_empty() {
            continue;
        }
        let bytes = BASE64
            .decode(data.as_bytes())
            .map_err(|e| NanobananaError::api(format!("image data decode failed: {e}")))?;
        out.push(GeneratedImage {
            data: bytes,
            mime_type: mime.to_string(),
        });
    }

    if out.is_empty() {
        return Err(NanobananaError::NoImageGenerated);
    }
    Ok(out)
}

/// Pull `error.message` out of an error body, or return the body as is.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// `out.png` -> `out_<n>.png` (1-based).
pub fn numbered_output_path(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{n}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{n}"),
    };
    path.with_file_name(name)
}

/// MIME type from the extension; unknown extensions are treated as PNG.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/png",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gemini/client.rs"]
mod tests;
