//! Landing Page and Authentication Panel
//!
//! The landing page switches one way into the auth panel. The panel submits
//! either the login or the register form and hands the resulting session to
//! a caller-supplied callback.

use crate::client::{Action, ApiResult, Backend};
use crate::forms::{FormError, LoginForm, RegisterForm};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::session::Session;

/// Which part of the landing page is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LandingMode {
    #[default]
    Landing,
    Auth,
}

/// Landing page state
#[derive(Debug, Clone, Default)]
pub struct LandingView {
    pub mode: LandingMode,
    pub panel: AuthPanel,
}

impl LandingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the auth panel; there is no way back within a visit
    pub fn open_auth(&mut self, tab: AuthTab) {
        self.mode = LandingMode::Auth;
        self.panel.select_tab(tab);
    }

    pub fn is_auth(&self) -> bool {
        self.mode == LandingMode::Auth
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

impl AuthTab {
    pub fn label(&self) -> &'static str {
        match self {
            AuthTab::Login => "Login",
            AuthTab::Register => "Register",
        }
    }
}

/// A validated auth submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Login(LoginRequest),
    Register(RegisterRequest),
}

impl AuthRequest {
    pub fn action(&self) -> Action {
        match self {
            AuthRequest::Login(_) => Action::Login,
            AuthRequest::Register(_) => Action::Register,
        }
    }
}

/// Send an auth request to the backend
pub async fn authenticate<B: Backend + ?Sized>(
    backend: &B,
    request: &AuthRequest,
) -> ApiResult<AuthResponse> {
    match request {
        AuthRequest::Login(req) => backend.login(req).await,
        AuthRequest::Register(req) => backend.register(req).await,
    }
}

/// Login/register forms with their shared loading and error state
#[derive(Debug, Clone, Default)]
pub struct AuthPanel {
    pub tab: AuthTab,
    pub login: LoginForm,
    pub register: RegisterForm,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthPanel {
    pub fn select_tab(&mut self, tab: AuthTab) {
        if self.tab != tab {
            self.tab = tab;
            self.error = None;
        }
    }

    /// Validate the active form and mark the panel busy
    pub fn begin_submit(&mut self) -> Result<AuthRequest, FormError> {
        if self.loading {
            return Err(FormError::Busy);
        }

        let request = match self.tab {
            AuthTab::Login => self.login.to_request().map(AuthRequest::Login),
            AuthTab::Register => self.register.to_request().map(AuthRequest::Register),
        };

        match request {
            Ok(request) => {
                self.loading = true;
                self.error = None;
                Ok(request)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Apply the backend's answer. Form fields are left as typed either way.
    pub fn finish_submit(
        &mut self,
        action: Action,
        outcome: ApiResult<AuthResponse>,
    ) -> Option<Session> {
        self.loading = false;
        match outcome {
            Ok(response) => {
                self.error = None;
                Some(Session::from(response))
            }
            Err(e) => {
                tracing::warn!(?action, error = %e, "Authentication failed");
                self.error = Some(e.user_message(action));
                None
            }
        }
    }

    /// Run a full submission; `on_authenticated` fires only on success.
    /// Returns whether it fired.
    pub async fn submit<B, F>(&mut self, backend: &B, on_authenticated: F) -> bool
    where
        B: Backend + ?Sized,
        F: FnOnce(Session),
    {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(_) => return false,
        };

        let outcome = authenticate(backend, &request).await;
        match self.finish_submit(request.action(), outcome) {
            Some(session) => {
                on_authenticated(session);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{user, MockBackend};
    use crate::client::ApiError;

    fn filled_login() -> AuthPanel {
        AuthPanel {
            login: LoginForm {
                email: "ada@example.com".into(),
                password: "hunter2".into(),
            },
            ..AuthPanel::default()
        }
    }

    #[test]
    fn test_open_auth_is_one_way() {
        let mut view = LandingView::new();
        assert!(!view.is_auth());
        view.open_auth(AuthTab::Register);
        assert!(view.is_auth());
        assert_eq!(view.panel.tab, AuthTab::Register);
        view.open_auth(AuthTab::Login);
        assert_eq!(view.mode, LandingMode::Auth);
    }

    #[tokio::test]
    async fn test_login_hands_over_exact_session() {
        let backend = MockBackend::new();
        *backend.auth.borrow_mut() = Some(Ok(AuthResponse {
            token: "jwt-abc".into(),
            user: user(),
        }));

        let mut panel = filled_login();
        let mut received = None;
        let fired = panel.submit(&backend, |s| received = Some(s)).await;

        assert!(fired);
        let session = received.unwrap();
        assert_eq!(session.token, "jwt-abc");
        assert_eq!(session.user, user());
        assert!(!panel.loading);
        assert_eq!(backend.calls("login"), 1);
    }

    #[tokio::test]
    async fn test_register_uses_register_endpoint() {
        let backend = MockBackend::new();
        *backend.auth.borrow_mut() = Some(Ok(AuthResponse {
            token: "jwt-new".into(),
            user: user(),
        }));

        let mut panel = AuthPanel::default();
        panel.select_tab(AuthTab::Register);
        panel.register = RegisterForm {
            email: "ada@example.com".into(),
            full_name: "Ada Lovelace".into(),
            password: "pw".into(),
        };

        let mut token = String::new();
        assert!(panel.submit(&backend, |s| token = s.token).await);
        assert_eq!(token, "jwt-new");
        assert_eq!(backend.calls("register"), 1);
        assert_eq!(backend.calls("login"), 0);
    }

    #[tokio::test]
    async fn test_invalid_credentials_keep_form() {
        let backend = MockBackend::new();
        *backend.auth.borrow_mut() = Some(Err(ApiError::Status {
            status: 401,
            detail: Some("Invalid credentials".into()),
        }));

        let mut panel = filled_login();
        let mut fired = false;
        let result = panel.submit(&backend, |_| fired = true).await;

        assert!(!result);
        assert!(!fired);
        assert_eq!(panel.error.as_deref(), Some("Invalid credentials"));
        assert_eq!(panel.login.email, "ada@example.com");
        assert_eq!(panel.login.password, "hunter2");
        assert!(!panel.loading);
    }

    #[tokio::test]
    async fn test_register_fallback_message() {
        let backend = MockBackend::new();
        *backend.auth.borrow_mut() = Some(Err(ApiError::Network("offline".into())));

        let mut panel = AuthPanel::default();
        panel.select_tab(AuthTab::Register);
        panel.register = RegisterForm {
            email: "ada@example.com".into(),
            full_name: "Ada".into(),
            password: "pw".into(),
        };
        assert!(!panel.submit(&backend, |_| {}).await);
        assert_eq!(panel.error.as_deref(), Some("Registration failed"));
    }

    #[tokio::test]
    async fn test_blank_fields_never_reach_backend() {
        let backend = MockBackend::new();
        let mut panel = AuthPanel::default();

        assert!(!panel.submit(&backend, |_| {}).await);
        assert_eq!(panel.error.as_deref(), Some("Email is required"));
        assert_eq!(backend.total_calls(), 0);
    }

    #[test]
    fn test_double_submit_refused() {
        let mut panel = filled_login();
        assert!(panel.begin_submit().is_ok());
        assert!(panel.loading);
        assert_eq!(panel.begin_submit(), Err(FormError::Busy));
    }
}
