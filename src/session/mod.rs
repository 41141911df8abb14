//! Session State
//!
//! The client-held record of who is logged in and which bearer token
//! proves it, plus the store the token survives restarts in.

pub mod store;

pub use store::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};

/// Whether mutation controls are available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

/// Authentication state owned by the controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    auth_token: Option<String>,
    current_username: Option<String>,
}

impl Session {
    /// A session holding a persisted token that has not been validated yet
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            auth_token: Some(token.into()),
            current_username: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.current_username.as_deref()
    }

    /// Logged in once a token has been confirmed for a username
    pub fn state(&self) -> SessionState {
        match (&self.auth_token, &self.current_username) {
            (Some(_), Some(_)) => SessionState::LoggedIn,
            _ => SessionState::LoggedOut,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == SessionState::LoggedIn
    }

    /// Replace the session after a successful login
    pub fn log_in(&mut self, token: impl Into<String>, username: impl Into<String>) {
        self.auth_token = Some(token.into());
        self.current_username = Some(username.into());
    }

    /// Mark the held token as belonging to `username`
    pub fn confirm(&mut self, username: impl Into<String>) {
        if self.auth_token.is_some() {
            self.current_username = Some(username.into());
        }
    }

    pub fn clear(&mut self) {
        self.auth_token = None;
        self.current_username = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_logged_out() {
        let session = Session::default();
        assert_eq!(session.state(), SessionState::LoggedOut);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_unvalidated_token_is_not_active() {
        let mut session = Session::with_token("abc");
        assert_eq!(session.token(), Some("abc"));
        assert!(!session.is_active());

        session.confirm("mchen");
        assert!(session.is_active());
        assert_eq!(session.username(), Some("mchen"));
    }

    #[test]
    fn test_confirm_without_token_stays_logged_out() {
        let mut session = Session::default();
        session.confirm("mchen");
        assert_eq!(session.state(), SessionState::LoggedOut);
    }

    #[test]
    fn test_login_then_clear() {
        let mut session = Session::default();
        session.log_in("tok", "mrodriguez");
        assert_eq!(session.state(), SessionState::LoggedIn);

        session.clear();
        assert_eq!(session, Session::default());
    }
}
