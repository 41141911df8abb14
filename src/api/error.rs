//! API Error Types
//!
//! Failures of a single backend call, split the way the UI reports them:
//! transport failures, application failures (non-2xx with an optional
//! `detail`), and bodies that do not match the expected shape.

use thiserror::Error;

/// Errors that can occur when talking to the activities backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, ...)
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("API error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    /// 2xx response with a body we could not parse
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text shown to the user for this failure.
    ///
    /// A server `detail` wins; otherwise `status_fallback` for application
    /// failures and `transport_fallback` for everything else.
    pub fn user_message(&self, status_fallback: &str, transport_fallback: &str) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Status { detail: None, .. } => status_fallback.to_string(),
            ApiError::Transport(_) | ApiError::Decode(_) => transport_fallback.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// HTTP status, for application failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if e.is_timeout() {
            ApiError::Transport("Request timeout".to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ApiError::Status {
            status: 401,
            detail: Some("Incorrect username or password".to_string()),
        };
        assert_eq!(
            err.user_message("Login failed", "Login failed. Please try again."),
            "Incorrect username or password"
        );
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_user_message_fallbacks() {
        let status = ApiError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(status.user_message("An error occurred", "offline"), "An error occurred");

        let transport = ApiError::Transport("connection refused".to_string());
        assert!(transport.is_transport());
        assert_eq!(transport.user_message("An error occurred", "offline"), "offline");

        let decode = ApiError::Decode("missing field".to_string());
        assert_eq!(decode.user_message("An error occurred", "offline"), "offline");
    }
}
