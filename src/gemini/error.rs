use serde::Serialize;

/// Closed classification of remote API failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorKind {
    InvalidApiKey,
    QuotaExceeded,
    RateLimited,
    SafetyBlocked,
    ApiError,
}

impl ApiErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::RateLimited => "RATE_LIMITED",
            Self::SafetyBlocked => "SAFETY_BLOCKED",
            Self::ApiError => "API_ERROR",
        }
    }

    /// Replacement message for classified errors. Unclassified errors keep
    /// the raw text instead.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::InvalidApiKey => "Invalid or unauthorized API key",
            Self::QuotaExceeded => "API quota exceeded",
            Self::RateLimited => "Rate limit exceeded, please wait",
            Self::SafetyBlocked => "Content blocked by safety filters",
            Self::ApiError => "API request failed",
        }
    }

    pub fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidApiKey => Some("Check your API key at https://aistudio.google.com/apikey"),
            Self::QuotaExceeded => Some("Wait before retrying or check your quota"),
            Self::SafetyBlocked => Some("Try rephrasing your prompt"),
            Self::RateLimited | Self::ApiError => None,
        }
    }
}

/// Classify raw API error text. Rules are checked in order; the first match
/// wins.
pub fn classify_api_error(raw: &str) -> ApiErrorKind {
    let has = |needles: &[&str]| needles.iter().any(|n| raw.contains(n));

    if has(&["API key", "unauthorized", "401"]) {
        ApiErrorKind::InvalidApiKey
    } else if has(&["quota", "429"]) {
        ApiErrorKind::QuotaExceeded
    } else if has(&["rate limit"]) {
        ApiErrorKind::RateLimited
    } else if has(&["safety", "blocked"]) {
        ApiErrorKind::SafetyBlocked
    } else {
        ApiErrorKind::ApiError
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gemini/error.rs"]
mod tests;
