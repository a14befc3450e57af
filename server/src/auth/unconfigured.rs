use super::errors::AuthError;
use super::provider::AuthProvider;
use super::types::{Credentials, Session, SignUpRequest};
use async_trait::async_trait;

/// Stand-in provider used when no backend credentials are configured.
///
/// Every mutating call is rejected with [`AuthError::NotConfigured`], while
/// the session lookup resolves to "no session" so the UI can still leave its
/// loading phase and show the sign-in views.
#[derive(Debug, Default, Clone)]
pub struct UnconfiguredAuthProvider;

impl UnconfiguredAuthProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuthProvider for UnconfiguredAuthProvider {
    async fn sign_up(&self, _request: &SignUpRequest) -> Result<Option<Session>, AuthError> {
        Err(AuthError::not_configured())
    }

    async fn sign_in(&self, _credentials: &Credentials) -> Result<Session, AuthError> {
        Err(AuthError::not_configured())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Err(AuthError::not_configured())
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(None)
    }

    fn provider_name(&self) -> &'static str {
        "unconfigured"
    }
}
