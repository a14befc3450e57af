use crate::error::AppResult;
use crate::services::notifications::{Notification, notify};
use server::auth::{
    AuthError, AuthProvider, AuthStateManager, Credentials, Session, SessionPhase, SignUpRequest,
    User,
};
use std::sync::Arc;
use std::sync::mpsc::Sender;

const RETRY_HINT: &str = ". Please try again in a moment.";

/// Couples an [`AuthProvider`] with the session state and the toast channel.
///
/// Every successful call moves the [`AuthStateManager`] to the matching phase
/// and sends a success toast. Failures leave the phase untouched, send an
/// error toast carrying the backend's message and return the error.
pub struct AuthService {
    auth_state: Arc<AuthStateManager>,
    provider: Arc<dyn AuthProvider>,
    tx: Sender<Notification>,
}

impl AuthService {
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        auth_state: Arc<AuthStateManager>,
        tx: Sender<Notification>,
    ) -> Self {
        log::debug!("Auth service using '{}' provider", provider.provider_name());
        Self {
            auth_state,
            provider,
            tx,
        }
    }

    pub fn auth_state(&self) -> &Arc<AuthStateManager> {
        &self.auth_state
    }

    /// Runs the initial session check and leaves the loading phase.
    ///
    /// A failing check counts as "no session" so the user can still reach the
    /// sign-in view.
    pub async fn initialize(&self) -> SessionPhase {
        let user = match self.provider.current_session().await {
            Ok(session) => session.map(|session| session.user),
            Err(e) => {
                log::warn!("Initial session check failed, treating as signed out: {e}");
                None
            }
        };

        self.auth_state.resolve_initial(user);
        self.auth_state.phase()
    }

    /// Seeds the provider with a session kept from an earlier run.
    pub async fn restore(&self, session: Session) {
        log::debug!("Restoring session for {}", session.user.email);
        self.provider.restore_session(session).await;
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let credentials = Credentials::new(email.trim(), password);

        let result = match credentials.validate() {
            Ok(()) => self.provider.sign_in(&credentials).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(session) => {
                log::info!("Signed in as {}", session.user.email);
                self.auth_state.set_authenticated(session.user.clone());
                notify(&self.tx, Notification::success("Signed in successfully!"));
                Ok(session)
            }
            Err(e) => Err(self.fail("sign in", e, "Failed to sign in")),
        }
    }

    /// Creates an account.
    ///
    /// Returns `None` when the backend requires email confirmation before the
    /// first sign-in; the session then stays unauthenticated.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AppResult<Option<Session>> {
        let request = SignUpRequest::new(email.trim(), password, display_name.trim());

        let result = match request.validate() {
            Ok(()) => self.provider.sign_up(&request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(session) => {
                if let Some(session) = &session {
                    self.auth_state.set_authenticated(session.user.clone());
                } else {
                    log::info!("Account {} awaits email confirmation", request.email);
                }
                notify(&self.tx, Notification::success("Account created successfully!"));
                Ok(session)
            }
            Err(e) => Err(self.fail("sign up", e, "Failed to create account")),
        }
    }

    /// Ends the session. The local phase becomes unauthenticated even when
    /// the backend call fails.
    pub async fn sign_out(&self) {
        if let Err(e) = self.provider.sign_out().await {
            log::error!("Error signing out: {e}");
        }
        self.auth_state.logout();
        notify(&self.tx, Notification::info("Signed out"));
    }

    pub fn current_user(&self) -> Option<User> {
        self.auth_state.current_user()
    }

    fn fail(&self, operation: &str, error: AuthError, fallback: &str) -> crate::error::AppError {
        log::warn!("Failed to {operation}: {error}");

        let message = error.to_string();
        let mut message = if message.is_empty() {
            fallback.to_string()
        } else {
            message
        };
        if error.is_transient() {
            message.push_str(RETRY_HINT);
        }
        notify(&self.tx, Notification::error(message));

        error.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::NotificationKind;
    use async_trait::async_trait;
    use server::auth::UnconfiguredAuthProvider;
    use std::sync::mpsc;

    /// Backend that is reachable but currently overloaded.
    struct OverloadedProvider;

    #[async_trait]
    impl AuthProvider for OverloadedProvider {
        async fn sign_up(&self, _request: &SignUpRequest) -> Result<Option<Session>, AuthError> {
            Err(AuthError::Network("connection reset".to_string()))
        }

        async fn sign_in(&self, _credentials: &Credentials) -> Result<Session, AuthError> {
            Err(AuthError::Backend {
                status: 503,
                message: "unavailable".to_string(),
            })
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            Ok(())
        }

        async fn current_session(&self) -> Result<Option<Session>, AuthError> {
            Ok(None)
        }

        fn provider_name(&self) -> &'static str {
            "overloaded"
        }
    }

    fn service() -> (AuthService, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel();
        let service = AuthService::new(
            Arc::new(UnconfiguredAuthProvider::new()),
            Arc::new(AuthStateManager::new()),
            tx,
        );
        (service, rx)
    }

    #[tokio::test]
    async fn test_initialize_without_backend_resolves_unauthenticated() {
        let (service, _rx) = service();
        assert!(service.auth_state().phase().is_loading());

        let phase = service.initialize().await;
        assert_eq!(phase, SessionPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn test_validation_runs_before_provider() {
        let (service, rx) = service();
        service.initialize().await;

        let err = service.sign_up("a@b.co", "12345", "Ann").await.unwrap_err();
        assert!(err.to_string().contains("at least 6 characters"));

        let toast = rx.try_recv().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.message, "Password must be at least 6 characters");
    }

    #[tokio::test]
    async fn test_unconfigured_backend_reports_error_toast() {
        let (service, rx) = service();
        service.initialize().await;

        assert!(service.sign_in("a@b.co", "secret1").await.is_err());
        assert_eq!(
            service.auth_state().phase(),
            SessionPhase::Unauthenticated
        );
        let toast = rx.try_recv().unwrap();
        assert!(toast.message.contains("not configured"));
    }

    #[tokio::test]
    async fn test_transient_failures_suggest_retry() {
        let (tx, rx) = mpsc::channel();
        let service = AuthService::new(
            Arc::new(OverloadedProvider),
            Arc::new(AuthStateManager::new()),
            tx,
        );
        service.initialize().await;

        assert!(service.sign_in("a@b.co", "secret1").await.is_err());
        let toast = rx.try_recv().unwrap();
        assert_eq!(
            toast.message,
            "Backend returned 503: unavailable. Please try again in a moment."
        );

        assert!(service.sign_up("a@b.co", "secret1", "Ann").await.is_err());
        assert!(rx.try_recv().unwrap().message.ends_with(RETRY_HINT));
    }

    #[tokio::test]
    async fn test_permanent_failures_have_no_retry_hint() {
        let (service, rx) = service();
        service.initialize().await;

        assert!(service.sign_in("a@b.co", "secret1").await.is_err());
        assert!(!rx.try_recv().unwrap().message.contains(RETRY_HINT));
    }
}
