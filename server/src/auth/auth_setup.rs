//! Selection of the authentication provider for the configured backend.
//!
//! This is the single place where missing backend credentials are handled,
//! following [`MissingCredentialsPolicy`].

use super::errors::AuthError;
use super::http_provider::HttpAuthProvider;
use super::provider::AuthProvider;
use super::types::{BackendConfig, MissingCredentialsPolicy};
use super::unconfigured::UnconfiguredAuthProvider;
use std::sync::Arc;

/// Creates the authentication provider for the given backend settings.
///
/// With credentials present this is an [`HttpAuthProvider`]. Without them
/// the result depends on `config.on_missing_credentials`:
///
/// - [`MissingCredentialsPolicy::Stub`] returns an [`UnconfiguredAuthProvider`]
///   that rejects every call with a descriptive message
/// - [`MissingCredentialsPolicy::Fail`] returns [`AuthError::NotConfigured`]
///
/// # Examples
///
/// ```no_run
/// use server::auth::{BackendConfig, create_auth_provider};
///
/// let provider = create_auth_provider(&BackendConfig::default())?;
/// assert_eq!(provider.provider_name(), "unconfigured");
/// # Ok::<(), server::auth::AuthError>(())
/// ```
pub fn create_auth_provider(config: &BackendConfig) -> Result<Arc<dyn AuthProvider>, AuthError> {
    if config.has_credentials() {
        let provider = HttpAuthProvider::new(config)?;
        log::info!("Using backend at {}", config.url().unwrap_or_default());
        return Ok(Arc::new(provider));
    }

    match config.on_missing_credentials {
        MissingCredentialsPolicy::Stub => {
            log::warn!(
                "Backend credentials missing or still placeholders; authentication calls will be rejected until backend.url and backend.anon_key are set"
            );
            Ok(Arc::new(UnconfiguredAuthProvider::new()))
        }
        MissingCredentialsPolicy::Fail => {
            log::error!("Backend credentials missing and on_missing_credentials = \"fail\"");
            Err(AuthError::not_configured())
        }
    }
}
