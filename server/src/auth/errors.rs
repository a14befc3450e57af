use thiserror::Error;

/// Message used whenever an operation reaches a backend that has no credentials.
pub const NOT_CONFIGURED_MESSAGE: &str = "Backend not configured. Please update your configuration with the project URL and anon key.";

/// Errors that can occur while talking to the authentication backend.
///
/// Every variant renders a human-readable message, which the UI shows
/// verbatim in a transient notification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    AccountExists,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Unexpected backend response: {0}")]
    InvalidResponse(String),
}

impl AuthError {
    pub fn not_configured() -> Self {
        AuthError::NotConfigured(NOT_CONFIGURED_MESSAGE.to_string())
    }

    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            AuthError::Network(_) => true,
            AuthError::Backend { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AuthError::InvalidResponse(err.to_string())
        } else {
            AuthError::Network(err.to_string())
        }
    }
}
