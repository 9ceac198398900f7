//! View State
//!
//! Framework-independent state for the landing page and the dashboard.
//! Renderers (the Leptos bundle, the terminal shell) own an instance, forward
//! user input to it, and draw whatever it exposes.
//!
//! Every submission is split in two so it works under any event loop:
//! `begin_*` validates and raises the loading flag, `finish_*` applies the
//! outcome. The async helpers run both halves against a [`Backend`].
//!
//! [`Backend`]: crate::client::Backend

pub mod badge;
pub mod dashboard;
pub mod history;
pub mod landing;

pub use badge::{BadgeIcon, BadgeTone, RiskBadge};
pub use dashboard::{Dashboard, DashboardTab, ImageTab, RiskTab};
pub use history::{HistoryCard, HistoryView, EMPTY_HISTORY_MESSAGE};
pub use landing::{authenticate, AuthPanel, AuthRequest, AuthTab, LandingMode, LandingView};

use crate::client::{Action, ApiError};
use crate::forms::FormError;

/// Severity of a transient notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message shown to the user (a toast)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Error notice for a failed API call
    pub fn from_api(action: Action, err: &ApiError) -> Self {
        tracing::warn!(?action, error = %err, "Request failed");
        Self::error(err.user_message(action))
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl From<FormError> for Notice {
    fn from(err: FormError) -> Self {
        Self::error(err.to_string())
    }
}
