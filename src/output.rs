//! User-facing output: a JSON envelope for scripts, colored text for people.

use std::fmt::Display;
use std::io::Write as _;
use std::path::Path;
use std::time::Instant;

use colored::Colorize as _;
use serde::Serialize;

use crate::foundation::error::NanobananaError;

/// Envelope printed in JSON mode.
#[derive(Debug, Serialize)]
pub struct Response<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&NanobananaError> for ErrorInfo {
    fn from(err: &NanobananaError) -> Self {
        let message = match err {
            NanobananaError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self {
            code: err.code().to_string(),
            message,
            hint: err.hint().map(str::to_string),
        }
    }
}

impl From<&anyhow::Error> for ErrorInfo {
    /// Typed errors keep their code even when wrapped in context.
    fn from(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<NanobananaError>() {
            Some(typed) => Self::from(typed),
            None => Self {
                code: "INTERNAL_ERROR".to_string(),
                message: format!("{err:#}"),
                hint: None,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Timing {
    pub total_ms: u64,
}

impl Timing {
    pub fn since(start: Instant) -> Self {
        Self {
            total_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// A written image, as reported in command data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageResult {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
}

impl ImageResult {
    pub fn new(path: &Path, width: u32, height: u32, format: impl Into<String>) -> Self {
        Self {
            path: path.display().to_string(),
            size: Some(ImageSize { width, height }),
            format: format.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Formatter {
    json: bool,
    quiet: bool,
}

impl Formatter {
    pub fn new(json: bool, quiet: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json, quiet }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Whether human-oriented chatter should be printed.
    fn chatty(&self) -> bool {
        !self.json && !self.quiet
    }

    pub fn success<T: Serialize>(&self, command: &str, data: T, timing: Option<Timing>) {
        if self.json {
            let resp = Response {
                success: true,
                command: Some(command.to_string()),
                data: Some(data),
                error: None,
                timing,
            };
            print_json(&resp);
        } else if !self.quiet {
            println!("{} Success", "✓".green());
        }
    }

    pub fn error(&self, command: &str, info: ErrorInfo) {
        if self.json {
            let resp: Response<()> = Response {
                success: false,
                command: Some(command.to_string()),
                data: None,
                error: Some(info),
                timing: None,
            };
            print_json(&resp);
            return;
        }

        eprintln!("{} [{}] {}", "Error:".red(), info.code, info.message);
        if let Some(hint) = info.hint {
            eprintln!("{} {hint}", "Hint:".yellow());
        }
    }

    pub fn progress(&self, msg: impl Display) {
        if self.chatty() {
            println!("{} {msg}", "→".cyan());
        }
    }

    pub fn info(&self, msg: impl Display) {
        if self.chatty() {
            println!("{msg}");
        }
    }

    pub fn image_saved(&self, path: &Path, width: u32, height: u32) {
        if self.chatty() {
            println!(
                "{} Saved: {} {}",
                "✓".green(),
                path.display(),
                format!("({width}x{height})").dimmed()
            );
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            let mut out = std::io::stdout().lock();
            let _ = writeln!(out, "{text}");
        }
        Err(e) => tracing::error!(error = %e, "failed to serialize JSON output"),
    }
}

#[cfg(test)]
#[path = "../tests/unit/output/mod.rs"]
mod tests;
