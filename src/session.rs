//! Session State
//!
//! The authenticated user's bearer token and profile. A session is created
//! from a login or registration response and dropped on logout; it is never
//! written to disk.

use crate::models::{AuthResponse, User};

/// Bearer token plus the profile it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Self::new(response.token, response.user)
    }
}

/// Holder for the current session, passed explicitly to whoever needs it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    current: Option<Session>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session, replacing any previous one
    pub fn establish(&mut self, session: Session) {
        tracing::info!(email = %session.user.email, "Session established");
        self.current = Some(session);
    }

    /// End the session (logout), returning it if there was one
    pub fn clear(&mut self) -> Option<Session> {
        let previous = self.current.take();
        if let Some(session) = &previous {
            tracing::info!(email = %session.user.email, "Session cleared");
        }
        previous
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User {
            id: "u1".into(),
            email: email.into(),
            full_name: "Test User".into(),
            created_at: None,
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut state = SessionState::new();
        assert!(!state.is_authenticated());
        assert_eq!(state.token(), None);

        state.establish(Session::new("t1", user("a@example.com")));
        assert!(state.is_authenticated());
        assert_eq!(state.token(), Some("t1"));

        state.establish(Session::new("t2", user("b@example.com")));
        assert_eq!(state.user().map(|u| u.email.as_str()), Some("b@example.com"));

        let cleared = state.clear().unwrap();
        assert_eq!(cleared.token, "t2");
        assert!(!state.is_authenticated());
        assert!(state.clear().is_none());
    }

    #[test]
    fn test_from_auth_response() {
        let response = AuthResponse {
            token: "abc".into(),
            user: user("a@example.com"),
        };
        let session = Session::from(response.clone());
        assert_eq!(session.token, response.token);
        assert_eq!(session.user, response.user);
    }
}
