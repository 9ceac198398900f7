//! Global Application State
//!
//! Reactive state management using Leptos signals. The session lives here and
//! is handed to the tree with `provide_context`, never read from a global.

use leptos::*;

use carescan::session::{Session, SessionState};
use carescan::views::{Notice, NoticeKind};

use crate::api::BrowserBackend;

/// How long a success toast stays up
const SUCCESS_TOAST_MS: u32 = 3000;
/// How long an error toast stays up
const ERROR_TOAST_MS: u32 = 5000;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Signed-in user, if any
    pub session: RwSignal<SessionState>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        session: create_rw_signal(SessionState::new()),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

/// Fetch the global state; panics outside of `App`
pub fn use_global_state() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}

impl GlobalState {
    /// API client for the current base URL setting
    pub fn backend(&self) -> BrowserBackend {
        BrowserBackend::from_storage()
    }

    /// Current session, if signed in
    pub fn current_session(&self) -> Option<Session> {
        self.session.with(|s| s.current().cloned())
    }

    /// Store a fresh session from login or registration
    pub fn sign_in(&self, session: Session) {
        self.session.update(|s| s.establish(session));
    }

    /// Drop the session; the dashboard unmounts with it
    pub fn sign_out(&self) {
        self.session.update(|s| {
            s.clear();
        });
        self.error.set(None);
        self.success.set(None);
    }

    /// Show a notice as a toast
    pub fn notify(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => self.show_success(&notice.message),
            NoticeKind::Error => {
                web_sys::console::warn_1(&notice.message.clone().into());
                self.show_error(&notice.message);
            }
        }
    }

    pub fn notify_all(&self, notices: &[Notice]) {
        for notice in notices {
            self.notify(notice);
        }
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(SUCCESS_TOAST_MS, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(ERROR_TOAST_MS, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
