use claims::assert_ok;
use server::auth::types::{PLACEHOLDER_ANON_KEY, PLACEHOLDER_URL};
use server::auth::{
    AuthError, AuthStateManager, BackendConfig, Credentials, HttpAuthProvider,
    MissingCredentialsPolicy, SessionPhase, User, create_auth_provider,
};
use std::sync::Arc;
use std::time::Duration;

fn config(url: &str, anon_key: &str, policy: MissingCredentialsPolicy) -> BackendConfig {
    BackendConfig {
        url: Some(url.to_string()),
        anon_key: Some(anon_key.to_string()),
        on_missing_credentials: policy,
        request_timeout_secs: Some(5),
    }
}

#[cfg(test)]
mod provider_selection {
    use super::*;

    #[tokio::test]
    async fn test_placeholder_credentials_yield_stub_provider() {
        let backend = config(
            PLACEHOLDER_URL,
            PLACEHOLDER_ANON_KEY,
            MissingCredentialsPolicy::Stub,
        );
        let provider = assert_ok!(create_auth_provider(&backend));
        assert_eq!(provider.provider_name(), "unconfigured");

        let err = provider
            .sign_in(&Credentials::new("ann@example.com", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NotConfigured(_)));
        assert_eq!(assert_ok!(provider.current_session().await), None);
    }

    #[test]
    fn test_fail_policy_refuses_to_start() {
        let backend = config("", "", MissingCredentialsPolicy::Fail);
        let err = create_auth_provider(&backend).err().unwrap();
        assert!(matches!(err, AuthError::NotConfigured(_)));
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn test_real_credentials_yield_http_provider() {
        let backend = config(
            "https://abc.example.co/",
            "anon",
            MissingCredentialsPolicy::Fail,
        );
        let provider = assert_ok!(create_auth_provider(&backend));
        assert_eq!(provider.provider_name(), "http");
    }

    #[test]
    fn test_http_provider_rejects_non_http_urls() {
        let backend = config("ftp://abc.example.co", "anon", MissingCredentialsPolicy::Stub);
        assert!(matches!(
            HttpAuthProvider::new(&backend),
            Err(AuthError::Validation(_))
        ));
    }
}

#[cfg(test)]
mod session_state {
    use super::*;

    #[tokio::test]
    async fn test_waiters_see_the_first_resolution() {
        let state = Arc::new(AuthStateManager::new());

        let waiter = {
            let state = state.clone();
            tokio::spawn(async move { state.wait_until_resolved().await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        let user = User {
            id: "u1".to_string(),
            email: "ann@example.com".to_string(),
            display_name: None,
        };
        assert!(state.resolve_initial(Some(user.clone())));
        assert!(!state.resolve_initial(None));

        let phase = waiter.await.unwrap();
        assert_eq!(phase, SessionPhase::Authenticated(user));
    }

    #[tokio::test]
    async fn test_dropped_subscribers_do_not_fault() {
        let state = AuthStateManager::new();
        let rx = state.subscribe();
        drop(rx);

        state.resolve_initial(None);
        state.logout();
        assert_eq!(state.phase(), SessionPhase::Unauthenticated);
    }
}
