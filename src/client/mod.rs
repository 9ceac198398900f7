//! Screening API Client
//!
//! The [`Backend`] trait is the seam between view state and the HTTP API.
//! The native [`HttpBackend`] uses reqwest; the browser bundle implements the
//! same trait on top of `fetch`.
//!
//! ## Endpoints
//!
//! - `POST /auth/register`, `POST /auth/login`, `GET /auth/me`
//! - `GET /analyses`
//! - `GET /medical-history`, `POST /medical-history`
//! - `POST /analyze-image` (multipart, field `file`)
//! - `POST /risk-assessment`
//! - `GET /` - service info
//!
//! Every call is fire-once: no retries, no timeouts, no caching.

mod error;
#[cfg(feature = "native")]
mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use error::{extract_detail, Action, ApiError, ApiResult};
#[cfg(feature = "native")]
pub use http::HttpBackend;

use async_trait::async_trait;

use crate::forms::ImageUpload;
use crate::models::{
    AnalysisRecord, AnalysisResult, AuthResponse, LoginRequest, MedicalHistory, RegisterRequest,
    ServiceInfo, User,
};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Multipart field carrying the uploaded image
pub const UPLOAD_FIELD: &str = "file";

/// Operations offered by the screening API.
///
/// Futures are not required to be `Send` so browser implementations can hold
/// JS handles across await points.
#[async_trait(?Send)]
pub trait Backend {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;

    /// Profile behind a token
    async fn current_user(&self, token: &str) -> ApiResult<User>;

    /// Analysis history, newest first as returned by the backend
    async fn analyses(&self, token: &str) -> ApiResult<Vec<AnalysisRecord>>;

    /// Stored questionnaire, `None` when the user never saved one
    async fn medical_history(&self, token: &str) -> ApiResult<Option<MedicalHistory>>;

    /// Replace the stored questionnaire
    async fn save_medical_history(
        &self,
        token: &str,
        history: &MedicalHistory,
    ) -> ApiResult<MedicalHistory>;

    async fn analyze_image(&self, token: &str, upload: &ImageUpload) -> ApiResult<AnalysisResult>;

    async fn assess_risk(&self, token: &str, history: &MedicalHistory) -> ApiResult<AnalysisResult>;

    /// Reachability check against the API root
    async fn service_info(&self) -> ApiResult<ServiceInfo>;
}

/// Join a base URL and an endpoint path without doubling slashes
pub fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Value of the `Authorization` header for a token
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Decode a success body; an empty or `null` body means "nothing stored"
pub fn decode_optional<T: serde::de::DeserializeOwned>(body: &str) -> ApiResult<Option<T>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(
            endpoint("http://localhost:8000/api/", "/auth/login"),
            "http://localhost:8000/api/auth/login"
        );
        assert_eq!(endpoint("http://x/api", "analyses"), "http://x/api/analyses");
        assert_eq!(endpoint("http://x/api", "/"), "http://x/api/");
    }

    #[test]
    fn test_decode_optional_history() {
        let none: Option<MedicalHistory> = decode_optional("null").unwrap();
        assert!(none.is_none());
        let empty: Option<MedicalHistory> = decode_optional("  ").unwrap();
        assert!(empty.is_none());

        let some: Option<MedicalHistory> = decode_optional(
            r#"{"age": 40, "family_history": false, "previous_biopsies": false, "hormone_therapy": true}"#,
        )
        .unwrap();
        assert_eq!(some.unwrap().age, 40);

        assert!(matches!(
            decode_optional::<MedicalHistory>("{oops"),
            Err(ApiError::Decode(_))
        ));
    }
}
