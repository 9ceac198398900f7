//! API Error Types
//!
//! Errors surfaced by a [`Backend`](super::Backend) and the rules for turning
//! them into the message a user sees.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the screening API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response; `detail` is the backend's own message when it sent one
    #[error("API error {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// A success response whose body could not be decoded
    #[error("Parse error: {0}")]
    Decode(String),
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Build a status error from a raw error body
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            detail: extract_detail(body),
        }
    }

    /// Backend-provided detail, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message to show for a failed `action`: the backend detail verbatim,
    /// otherwise that action's fallback copy
    pub fn user_message(&self, action: Action) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| action.fallback_message().to_string())
    }
}

/// Pull the `detail` out of a FastAPI style error body.
///
/// A string detail is returned as-is; a validation array is flattened to its
/// `msg` entries joined with `"; "`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

/// User-initiated operations, each with its own fallback copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Login,
    Register,
    AnalyzeImage,
    AssessRisk,
    SaveHistory,
    LoadHistory,
    LoadAnalyses,
}

impl Action {
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Action::Login => "Login failed",
            Action::Register => "Registration failed",
            Action::AnalyzeImage => "Image analysis failed",
            Action::AssessRisk => "Risk assessment failed",
            Action::SaveHistory => "Failed to save medical history",
            Action::LoadHistory => "Failed to load medical history",
            Action::LoadAnalyses => "Failed to load analysis history",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail_is_verbatim() {
        let err = ApiError::from_response(401, r#"{"detail": "Invalid credentials"}"#);
        assert_eq!(err.detail(), Some("Invalid credentials"));
        assert_eq!(err.user_message(Action::Login), "Invalid credentials");
    }

    #[test]
    fn test_validation_array_detail() {
        let body = r#"{"detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"},
            {"loc": ["body", "password"], "msg": "field required", "type": "missing"}
        ]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(
            err.detail(),
            Some("value is not a valid email address; field required")
        );
    }

    #[test]
    fn test_fallback_when_no_detail() {
        let html = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(html.detail(), None);
        assert_eq!(html.user_message(Action::AnalyzeImage), "Image analysis failed");

        let empty = ApiError::from_response(500, r#"{"detail": ""}"#);
        assert_eq!(empty.user_message(Action::Register), "Registration failed");

        let network = ApiError::Network("connection refused".into());
        assert_eq!(network.user_message(Action::SaveHistory), "Failed to save medical history");

        let decode = ApiError::Decode("expected value".into());
        assert_eq!(decode.user_message(Action::AssessRisk), "Risk assessment failed");
    }
}
