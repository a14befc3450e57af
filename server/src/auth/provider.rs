use super::errors::AuthError;
use super::types::{Credentials, Session, SignUpRequest};
use async_trait::async_trait;

/// Trait for backends that can create accounts and sessions.
///
/// The protocol itself belongs to the hosted backend; implementations only
/// translate these four operations into its API and map failures onto
/// [`AuthError`].
///
/// # Examples
///
/// ```no_run
/// use server::auth::{AuthError, AuthProvider, Credentials, Session, SignUpRequest};
/// use async_trait::async_trait;
///
/// struct OfflineProvider;
///
/// #[async_trait]
/// impl AuthProvider for OfflineProvider {
///     async fn sign_up(&self, _request: &SignUpRequest) -> Result<Option<Session>, AuthError> {
///         Err(AuthError::Network("offline".to_string()))
///     }
///
///     async fn sign_in(&self, _credentials: &Credentials) -> Result<Session, AuthError> {
///         Err(AuthError::Network("offline".to_string()))
///     }
///
///     async fn sign_out(&self) -> Result<(), AuthError> {
///         Ok(())
///     }
///
///     async fn current_session(&self) -> Result<Option<Session>, AuthError> {
///         Ok(None)
///     }
///
///     fn provider_name(&self) -> &'static str {
///         "offline"
///     }
/// }
/// ```
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Creates an account.
    ///
    /// Returns the new session when the backend signs the user in right away,
    /// or `None` when the account still needs email confirmation.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<Option<Session>, AuthError>;

    /// Exchanges an email and password for a session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Ends the current session. Succeeds when there is no session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Looks up the session restored from a previous run, if any.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Seeds the provider with a session persisted by an earlier run.
    ///
    /// Providers without client-side sessions ignore it.
    async fn restore_session(&self, _session: Session) {}

    /// Short name used in log lines.
    fn provider_name(&self) -> &'static str;
}
