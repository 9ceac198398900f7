//! In-memory backend for view tests.

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;

use super::{ApiError, ApiResult, Backend};
use crate::forms::ImageUpload;
use crate::models::{
    AnalysisRecord, AnalysisResult, AnalysisType, AuthResponse, LoginRequest, MedicalHistory,
    RegisterRequest, RiskLevel, ServiceInfo, User,
};

/// Canned responses plus a per-endpoint call counter
#[derive(Default)]
pub struct MockBackend {
    pub auth: RefCell<Option<ApiResult<AuthResponse>>>,
    pub image_result: RefCell<Option<ApiResult<AnalysisResult>>>,
    pub risk_result: RefCell<Option<ApiResult<AnalysisResult>>>,
    pub records: RefCell<Vec<AnalysisRecord>>,
    pub history: RefCell<Option<MedicalHistory>>,
    pub history_error: RefCell<Option<ApiError>>,
    pub save_error: RefCell<Option<ApiError>>,
    pub sent_histories: RefCell<Vec<MedicalHistory>>,
    pub calls: RefCell<HashMap<&'static str, usize>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self, endpoint: &'static str) -> usize {
        self.calls.borrow().get(endpoint).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().values().sum()
    }

    fn hit(&self, endpoint: &'static str) {
        *self.calls.borrow_mut().entry(endpoint).or_insert(0) += 1;
    }

    fn canned<T: Clone>(slot: &RefCell<Option<ApiResult<T>>>) -> ApiResult<T> {
        slot.borrow()
            .clone()
            .unwrap_or_else(|| Err(ApiError::Network("no canned response".into())))
    }
}

pub fn user() -> User {
    User {
        id: "u1".into(),
        email: "ada@example.com".into(),
        full_name: "Ada Lovelace".into(),
        created_at: None,
    }
}

pub fn result(analysis_type: AnalysisType, risk_level: RiskLevel) -> AnalysisResult {
    AnalysisResult {
        id: Some("a1".into()),
        analysis_type,
        risk_level,
        result: "findings".into(),
        recommendations: vec!["Consult with a healthcare professional".into()],
    }
}

pub fn record(id: &str, analysis_type: AnalysisType, risk_level: RiskLevel) -> AnalysisRecord {
    AnalysisRecord {
        id: id.into(),
        analysis_type,
        risk_level,
        result: "findings".into(),
        created_at: "2024-05-01T10:30:00+00:00".into(),
        recommendations: vec![],
    }
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    async fn register(&self, _request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.hit("register");
        Self::canned(&self.auth)
    }

    async fn login(&self, _request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.hit("login");
        Self::canned(&self.auth)
    }

    async fn current_user(&self, _token: &str) -> ApiResult<User> {
        self.hit("me");
        Ok(user())
    }

    async fn analyses(&self, _token: &str) -> ApiResult<Vec<AnalysisRecord>> {
        self.hit("analyses");
        Ok(self.records.borrow().clone())
    }

    async fn medical_history(&self, _token: &str) -> ApiResult<Option<MedicalHistory>> {
        self.hit("medical_history");
        if let Some(err) = self.history_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.history.borrow().clone())
    }

    async fn save_medical_history(
        &self,
        _token: &str,
        history: &MedicalHistory,
    ) -> ApiResult<MedicalHistory> {
        self.hit("save_history");
        if let Some(err) = self.save_error.borrow().clone() {
            return Err(err);
        }
        self.sent_histories.borrow_mut().push(history.clone());
        *self.history.borrow_mut() = Some(history.clone());
        Ok(history.clone())
    }

    async fn analyze_image(&self, _token: &str, _upload: &ImageUpload) -> ApiResult<AnalysisResult> {
        self.hit("analyze_image");
        Self::canned(&self.image_result)
    }

    async fn assess_risk(&self, _token: &str, history: &MedicalHistory) -> ApiResult<AnalysisResult> {
        self.hit("assess_risk");
        self.sent_histories.borrow_mut().push(history.clone());
        Self::canned(&self.risk_result)
    }

    async fn service_info(&self) -> ApiResult<ServiceInfo> {
        self.hit("service_info");
        Ok(ServiceInfo {
            message: "ok".into(),
        })
    }
}
