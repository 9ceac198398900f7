//! # CareScan
//!
//! Client for a breast-health screening service: sign in, upload an image for
//! analysis, fill out a risk questionnaire, and review past analyses.
//!
//! Image analysis and risk scoring happen behind the service's HTTP API; this
//! crate holds the wire types, the API client, form validation, and the view
//! state that front ends render.
//!
//! ## Modules
//!
//! - [`models`]: Entities exchanged with the API
//! - [`client`]: The [`Backend`] seam and the reqwest implementation
//! - [`forms`]: Form fields, validation, questionnaire defaults
//! - [`session`]: Explicit session lifecycle
//! - [`views`]: Landing and dashboard view state
//! - `config` / `server` (native only): configuration and the static host
//!   for the browser bundle
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use carescan::client::HttpBackend;
//! use carescan::forms::LoginForm;
//! use carescan::views::{AuthPanel, Dashboard};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = HttpBackend::new("http://localhost:8000/api");
//!
//!     let mut panel = AuthPanel {
//!         login: LoginForm {
//!             email: "ada@example.com".into(),
//!             password: "secret".into(),
//!         },
//!         ..AuthPanel::default()
//!     };
//!
//!     let mut session = None;
//!     panel.submit(&backend, |s| session = Some(s)).await;
//!
//!     if let Some(session) = session {
//!         let mut dashboard = Dashboard::new();
//!         dashboard.mount(&backend, &session).await;
//!         println!("{} analyses on record", dashboard.analyses.len());
//!     }
//! }
//! ```

pub mod client;
pub mod forms;
pub mod models;
pub mod session;
pub mod views;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod server;

// Re-export top-level types for convenience
pub use client::{Action, ApiError, ApiResult, Backend, DEFAULT_API_BASE};

#[cfg(feature = "native")]
pub use client::HttpBackend;

pub use forms::{
    FormError, ImageUpload, LoginForm, RegisterForm, RiskForm, HISTORY_DEFAULTS, MAX_UPLOAD_BYTES,
};

pub use models::{
    AnalysisRecord, AnalysisResult, AnalysisType, AuthResponse, BreastDensity, MedicalHistory,
    RiskLevel, User,
};

pub use session::{Session, SessionState};

pub use views::{
    AuthPanel, AuthTab, Dashboard, DashboardTab, HistoryView, LandingView, Notice, NoticeKind,
    RiskBadge,
};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
