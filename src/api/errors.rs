use thiserror::Error;

/// Error taxonomy surfaced to the admin, mirroring the backend contract:
/// 401 triggers one token refresh and, on failure, session teardown; 403 is
/// surfaced without retry; 429 gets its own message; everything else falls
/// back to the backend-provided message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no active session - sign in first")]
    NotAuthenticated,
    #[error("session expired and token refresh failed - signed out")]
    SessionExpired,
    #[error("permission denied: {message}")]
    Forbidden { message: String },
    #[error("rate limited by the backend - try again shortly")]
    RateLimited,
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("backend error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl ApiError {
    /// Whether this failure invalidated the session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::NotAuthenticated | ApiError::SessionExpired)
    }
}
