//! Native HTTP backend built on reqwest.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{bearer, decode_optional, endpoint, ApiError, ApiResult, Backend, UPLOAD_FIELD};
use crate::forms::ImageUpload;
use crate::models::{
    AnalysisRecord, AnalysisResult, AuthResponse, LoginRequest, MedicalHistory, RegisterRequest,
    ServiceInfo, User,
};

/// Screening API client over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client against `base_url` (e.g. "http://localhost:8000/api")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(endpoint(&self.base_url, path))
    }

    fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> RequestBuilder {
        self.client.post(endpoint(&self.base_url, path)).json(body)
    }

    /// Send and return the raw success body
    async fn send_raw(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let url = response.url().path().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "API response");

        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::from_response(status.as_u16(), &body))
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.send_raw(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.send(self.post_json("/auth/register", request)).await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.send(self.post_json("/auth/login", request)).await
    }

    async fn current_user(&self, token: &str) -> ApiResult<User> {
        self.send(self.get("/auth/me").header("Authorization", bearer(token)))
            .await
    }

    async fn analyses(&self, token: &str) -> ApiResult<Vec<AnalysisRecord>> {
        self.send(self.get("/analyses").header("Authorization", bearer(token)))
            .await
    }

    async fn medical_history(&self, token: &str) -> ApiResult<Option<MedicalHistory>> {
        let body = self
            .send_raw(self.get("/medical-history").header("Authorization", bearer(token)))
            .await?;
        decode_optional(&body)
    }

    async fn save_medical_history(
        &self,
        token: &str,
        history: &MedicalHistory,
    ) -> ApiResult<MedicalHistory> {
        self.send(
            self.post_json("/medical-history", history)
                .header("Authorization", bearer(token)),
        )
        .await
    }

    async fn analyze_image(&self, token: &str, upload: &ImageUpload) -> ApiResult<AnalysisResult> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        self.send(
            self.client
                .post(endpoint(&self.base_url, "/analyze-image"))
                .header("Authorization", bearer(token))
                .multipart(form),
        )
        .await
    }

    async fn assess_risk(&self, token: &str, history: &MedicalHistory) -> ApiResult<AnalysisResult> {
        self.send(
            self.post_json("/risk-assessment", history)
                .header("Authorization", bearer(token)),
        )
        .await
    }

    async fn service_info(&self) -> ApiResult<ServiceInfo> {
        self.send(self.get("/")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisType, BreastDensity, RiskLevel};
    use axum::{
        extract::Multipart,
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    const TOKEN: &str = "tok-123";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {}", TOKEN))
            .unwrap_or(false)
    }

    fn unauthorized() -> Response {
        (StatusCode::FORBIDDEN, Json(json!({"detail": "Not authenticated"}))).into_response()
    }

    async fn login(Json(body): Json<Value>) -> Response {
        if body["password"] == "secret" {
            Json(json!({
                "token": TOKEN,
                "user": {"id": "u1", "email": body["email"], "full_name": "Ada Lovelace"}
            }))
            .into_response()
        } else {
            (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Invalid credentials"})))
                .into_response()
        }
    }

    async fn analyze(headers: HeaderMap, mut multipart: Multipart) -> Response {
        if !authorized(&headers) {
            return unauthorized();
        }
        let mut fields = Vec::new();
        let mut size = 0;
        while let Ok(Some(field)) = multipart.next_field().await {
            fields.push(field.name().unwrap_or_default().to_string());
            size += field.bytes().await.map(|b| b.len()).unwrap_or(0);
        }
        Json(json!({
            "id": "a1",
            "analysis_type": "image",
            "risk_level": "low",
            "result": format!("fields={} size={}", fields.join(","), size),
            "recommendations": ["Maintain regular screening schedule"]
        }))
        .into_response()
    }

    async fn assess(headers: HeaderMap, Json(body): Json<Value>) -> Response {
        if !authorized(&headers) {
            return unauthorized();
        }
        Json(json!({
            "analysis_type": "risk_assessment",
            "risk_level": "moderate",
            "result": body.to_string(),
            "recommendations": []
        }))
        .into_response()
    }

    async fn history(headers: HeaderMap) -> Response {
        if !authorized(&headers) {
            return unauthorized();
        }
        Json(Value::Null).into_response()
    }

    async fn analyses(headers: HeaderMap) -> Response {
        if !authorized(&headers) {
            return unauthorized();
        }
        Json(json!([
            {"id": "a2", "analysis_type": "risk_assessment", "risk_level": "high",
             "result": "r", "created_at": "2024-05-02T00:00:00Z", "recommendations": []},
            {"id": "a1", "analysis_type": "image", "risk_level": "low",
             "result": "i", "created_at": "2024-05-01T00:00:00Z", "recommendations": []}
        ]))
        .into_response()
    }

    async fn broken() -> Response {
        (StatusCode::OK, "not json").into_response()
    }

    /// Start a stub API and return its base URL
    async fn spawn_stub() -> String {
        let app = Router::new()
            .route(
                "/api/",
                get(|| async { Json(json!({"message": "Breast Cancer Detection API"})) }),
            )
            .route("/api/auth/login", post(login))
            .route("/api/auth/me", get(broken))
            .route("/api/analyze-image", post(analyze))
            .route("/api/risk-assessment", post(assess))
            .route("/api/medical-history", get(history))
            .route("/api/analyses", get(analyses));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    #[tokio::test]
    async fn test_login_success_and_failure() {
        let backend = HttpBackend::new(spawn_stub().await);

        let ok = backend
            .login(&LoginRequest {
                email: "ada@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert_eq!(ok.token, TOKEN);
        assert_eq!(ok.user.email, "ada@example.com");

        let err = backend
            .login(&LoginRequest {
                email: "ada@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 401,
                detail: Some("Invalid credentials".into())
            }
        );
    }

    #[tokio::test]
    async fn test_upload_is_single_multipart_field() {
        let backend = HttpBackend::new(spawn_stub().await);
        let upload = ImageUpload::new("scan.png", "image/png", vec![7u8; 2048]);

        let result = backend.analyze_image(TOKEN, &upload).await.unwrap();
        assert_eq!(result.analysis_type, AnalysisType::Image);
        assert_eq!(result.result, "fields=file size=2048");
    }

    #[tokio::test]
    async fn test_assess_sends_nulls_for_blank_ages() {
        let backend = HttpBackend::new(spawn_stub().await);
        let history = MedicalHistory {
            age: 38,
            family_history: false,
            previous_biopsies: false,
            hormone_therapy: true,
            first_pregnancy_age: None,
            menstruation_age: None,
            breast_density: Some(BreastDensity::Normal),
        };

        let result = backend.assess_risk(TOKEN, &history).await.unwrap();
        assert_eq!(result.risk_level, RiskLevel::Moderate);
        let echoed: Value = serde_json::from_str(&result.result).unwrap();
        assert!(echoed["first_pregnancy_age"].is_null());
        assert!(echoed["menstruation_age"].is_null());
        assert_eq!(echoed["age"], 38);
    }

    #[tokio::test]
    async fn test_bearer_header_required() {
        let backend = HttpBackend::new(spawn_stub().await);

        let records = backend.analyses(TOKEN).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "a2");

        let err = backend.analyses("other").await.unwrap_err();
        assert_eq!(err.detail(), Some("Not authenticated"));
    }

    #[tokio::test]
    async fn test_null_history_and_bad_body() {
        let backend = HttpBackend::new(spawn_stub().await);

        assert_eq!(backend.medical_history(TOKEN).await.unwrap(), None);
        assert!(matches!(
            backend.current_user(TOKEN).await,
            Err(ApiError::Decode(_))
        ));

        let info = backend.service_info().await.unwrap();
        assert_eq!(info.message, "Breast Cancer Detection API");
    }

    #[tokio::test]
    async fn test_unreachable_is_network_error() {
        let backend = HttpBackend::new("http://127.0.0.1:1/api");
        assert!(matches!(
            backend.service_info().await,
            Err(ApiError::Network(_))
        ));
    }
}
