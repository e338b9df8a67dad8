//! Per-invocation configuration.
//!
//! Values are resolved once, in precedence order: command-line flag,
//! environment, `config.toml` in the platform config directory, defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use directories::ProjectDirs;
use serde::Deserialize;

use crate::foundation::error::{NanobananaError, NanobananaResult};
use crate::gemini::resolve_model_name;

pub const DEFAULT_MODEL: &str = "flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Environment variables checked for the API key, first non-empty wins.
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "NANOBANANA_API_KEY", "GOOGLE_API_KEY"];
pub const MODEL_VAR: &str = "NANOBANANA_MODEL";

/// Contents of `config.toml`. Every key is optional.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub output_dir: Option<PathBuf>,
}

/// Values supplied on the command line.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    /// Alias (`flash`, `pro`) or full model id.
    pub model: String,
    pub timeout: Duration,
    pub output_dir: PathBuf,
}

impl Config {
    /// Resolve from flags, the process environment and the default config
    /// file.
    pub fn load(overrides: &Overrides) -> NanobananaResult<Self> {
        let file = match default_config_path() {
            Some(path) => load_file(&path)?,
            None => None,
        };
        Ok(Self::resolve_with(overrides, file, |name| std::env::var(name).ok()))
    }

    /// Resolve with an injected environment lookup.
    pub fn resolve_with<F>(overrides: &Overrides, file: Option<FileConfig>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        let file = file.unwrap_or_default();

        let api_key = non_empty(overrides.api_key.clone())
            .or_else(|| API_KEY_VARS.iter().find_map(|name| env(*name)))
            .or_else(|| non_empty(file.api_key));
        let model = non_empty(overrides.model.clone())
            .or_else(|| env(MODEL_VAR))
            .or_else(|| non_empty(file.model))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            api_key,
            model,
            timeout: file
                .timeout_secs
                .filter(|s| *s > 0)
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
            output_dir: file.output_dir.unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Full model id for API calls.
    pub fn model_id(&self) -> &str {
        resolve_model_name(&self.model)
    }

    /// Place a relative output path under the configured output directory.
    pub fn output_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || self.output_dir == Path::new(".") {
            path.to_path_buf()
        } else {
            self.output_dir.join(path)
        }
    }

    pub fn require_api_key(&self) -> NanobananaResult<&str> {
        self.api_key.as_deref().ok_or(NanobananaError::MissingApiKey)
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// `config.toml` in the platform config directory, e.g.
/// `~/.config/nanobanana/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nanobanana").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Read a config file; a missing file is not an error.
pub fn load_file(path: &Path) -> NanobananaResult<Option<FileConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    let parsed: FileConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse config '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(Some(parsed))
}

#[cfg(test)]
#[path = "../tests/unit/config/mod.rs"]
mod tests;
