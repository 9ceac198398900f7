//! HTTP API Client
//!
//! [`Backend`] over the browser's `fetch`, via gloo-net.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use carescan::client::{
    bearer, decode_optional, endpoint, ApiError, ApiResult, Backend, DEFAULT_API_BASE,
    UPLOAD_FIELD,
};
use carescan::forms::{guess_content_type, ImageUpload};
use carescan::models::{
    AnalysisRecord, AnalysisResult, AuthResponse, LoginRequest, MedicalHistory, RegisterRequest,
    ServiceInfo, User,
};

/// Local storage key holding a custom API base URL
const API_URL_KEY: &str = "carescan_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty());

    normalize(stored.as_deref().unwrap_or(DEFAULT_API_BASE))
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, &normalize(url));
        }
    }
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Screening API client running in the browser
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserBackend {
    base_url: String,
}

impl BrowserBackend {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize(base_url.as_ref()),
        }
    }

    /// Client against the base URL currently in local storage
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> ApiResult<Request> {
        let mut builder = Request::post(&self.url(path));
        if let Some(token) = token {
            builder = builder.header("Authorization", &bearer(token));
        }
        builder.json(body).map_err(build_error)
    }

    fn get_authed(&self, path: &str, token: &str) -> ApiResult<Request> {
        Request::get(&self.url(path))
            .header("Authorization", &bearer(token))
            .build()
            .map_err(build_error)
    }

    /// Send and return the raw success body
    async fn send_raw(&self, request: Request) -> ApiResult<String> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let ok = response.ok();
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if ok {
            Ok(body)
        } else {
            Err(ApiError::from_response(status, &body))
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: Request) -> ApiResult<T> {
        let body = self.send_raw(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn build_error(e: gloo_net::Error) -> ApiError {
    ApiError::Network(format!("Request build error: {}", e))
}

/// Multipart body with the image as its only field
fn upload_form(upload: &ImageUpload) -> Result<web_sys::FormData, JsValue> {
    let bytes = js_sys::Uint8Array::from(upload.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);

    let mut options = web_sys::BlobPropertyBag::new();
    options.type_(&upload.content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let form = web_sys::FormData::new()?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &upload.file_name)?;
    Ok(form)
}

/// Read a picked file into memory. Check the size before calling this.
pub async fn read_file(file: &web_sys::File) -> Result<ImageUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Could not read file: {:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let name = file.name();
    let content_type = match file.type_() {
        t if t.is_empty() => guess_content_type(&name).to_string(),
        t => t,
    };

    Ok(ImageUpload::new(name, content_type, bytes))
}

#[async_trait(?Send)]
impl Backend for BrowserBackend {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        let request = self.post_json("/auth/register", None, request)?;
        self.send(request).await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        let request = self.post_json("/auth/login", None, request)?;
        self.send(request).await
    }

    async fn current_user(&self, token: &str) -> ApiResult<User> {
        self.send(self.get_authed("/auth/me", token)?).await
    }

    async fn analyses(&self, token: &str) -> ApiResult<Vec<AnalysisRecord>> {
        self.send(self.get_authed("/analyses", token)?).await
    }

    async fn medical_history(&self, token: &str) -> ApiResult<Option<MedicalHistory>> {
        let body = self
            .send_raw(self.get_authed("/medical-history", token)?)
            .await?;
        decode_optional(&body)
    }

    async fn save_medical_history(
        &self,
        token: &str,
        history: &MedicalHistory,
    ) -> ApiResult<MedicalHistory> {
        let request = self.post_json("/medical-history", Some(token), history)?;
        self.send(request).await
    }

    async fn analyze_image(&self, token: &str, upload: &ImageUpload) -> ApiResult<AnalysisResult> {
        let form = upload_form(upload)
            .map_err(|e| ApiError::Network(format!("Request build error: {:?}", e)))?;

        // No Content-Type header: the browser adds the multipart boundary
        let request = Request::post(&self.url("/analyze-image"))
            .header("Authorization", &bearer(token))
            .body(form)
            .map_err(build_error)?;
        self.send(request).await
    }

    async fn assess_risk(&self, token: &str, history: &MedicalHistory) -> ApiResult<AnalysisResult> {
        let request = self.post_json("/risk-assessment", Some(token), history)?;
        self.send(request).await
    }

    async fn service_info(&self) -> ApiResult<ServiceInfo> {
        let request = Request::get(&self.url("/")).build().map_err(build_error)?;
        self.send(request).await
    }
}
