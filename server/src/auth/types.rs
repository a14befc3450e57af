use super::errors::AuthError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum password length accepted before a request reaches the backend.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Project URL shipped in the sample environment file.
pub const PLACEHOLDER_URL: &str = "https://your-project-id.supabase.co";

/// Anon key shipped in the sample environment file.
pub const PLACEHOLDER_ANON_KEY: &str = "your-anon-key-here";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// An authenticated account as reported by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl User {
    /// Name shown in the dashboard header, falling back to the email address.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email)
    }
}

/// A signed-in session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: User,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= Utc::now())
    }
}

/// Email and password pair for sign-in.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks performed locally so obviously bad input never reaches the backend.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AuthError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sign-up form contents.
#[derive(Clone, Debug)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

impl SignUpRequest {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            display_name: display_name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty()
            || self.password.is_empty()
            || self.display_name.trim().is_empty()
        {
            return Err(AuthError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        Ok(())
    }
}

/// What to do when the backend URL or anon key is missing.
///
/// `Stub` keeps the application usable for local development: a stub
/// provider rejects every call with a descriptive message. `Fail` refuses to
/// start.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingCredentialsPolicy {
    #[default]
    Stub,
    Fail,
}

/// Connection settings for the hosted backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    #[serde(default)]
    pub on_missing_credentials: MissingCredentialsPolicy,
    pub request_timeout_secs: Option<u64>,
}

impl BackendConfig {
    pub fn url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && *url != PLACEHOLDER_URL)
    }

    pub fn anon_key(&self) -> Option<&str> {
        self.anon_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_ANON_KEY)
    }

    /// True when both the URL and the anon key are set to non-placeholder values.
    pub fn has_credentials(&self) -> bool {
        self.url().is_some() && self.anon_key().is_some()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}
