use super::errors::AuthError;
use super::provider::AuthProvider;
use super::types::{BackendConfig, Credentials, Session, SignUpRequest, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::RwLock;

#[derive(Deserialize)]
struct WireUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Value,
}

impl From<WireUser> for User {
    fn from(user: WireUser) -> Self {
        let display_name = user.user_metadata["full_name"]
            .as_str()
            .map(|name| name.to_string());
        Self {
            id: user.id,
            email: user.email.unwrap_or_default(),
            display_name,
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: WireUser,
}

impl From<TokenResponse> for Session {
    fn from(token: TokenResponse) -> Self {
        let expires_at = token
            .expires_at
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .or_else(|| {
                token
                    .expires_in
                    .and_then(chrono::Duration::try_seconds)
                    .map(|lifetime| Utc::now() + lifetime)
            });

        Self {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at,
            user: token.user.into(),
        }
    }
}

/// Authentication provider for a GoTrue-compatible REST API.
///
/// Holds the session obtained by the last successful sign-in so that
/// [`AuthProvider::current_session`] and [`AuthProvider::sign_out`] can use it.
pub struct HttpAuthProvider {
    base_url: String,
    anon_key: String,
    http_client: reqwest::Client,
    session: RwLock<Option<Session>>,
}

impl HttpAuthProvider {
    /// Builds a provider from backend settings.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotConfigured`] if the URL or anon key is missing,
    /// and [`AuthError::Validation`] if the URL is not an http(s) URL.
    pub fn new(config: &BackendConfig) -> Result<Self, AuthError> {
        let (Some(url), Some(anon_key)) = (config.url(), config.anon_key()) else {
            return Err(AuthError::not_configured());
        };

        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(AuthError::Validation(format!(
                "Backend URL must start with http:// or https://, got '{url}'"
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AuthError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            http_client,
            session: RwLock::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    async fn error_body(response: reqwest::Response) -> Value {
        response.json::<Value>().await.unwrap_or_default()
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<Option<Session>, AuthError> {
        request.validate()?;

        log::info!("Signing up {} via backend", request.email);
        let response = self
            .http_client
            .post(self.endpoint("signup"))
            .header("apikey", &self.anon_key)
            .json(&json!({
                "email": request.email,
                "password": request.password,
                "data": { "full_name": request.display_name },
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = Self::error_body(response).await;
            return Err(map_sign_up_error(status.as_u16(), &body));
        }

        let body: Value = response.json().await?;
        let session = session_from_sign_up(body)?;
        if let Some(ref session) = session {
            *self.session.write().await = Some(session.clone());
        } else {
            log::info!("Account created for {}, awaiting confirmation", request.email);
        }

        Ok(session)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        credentials.validate()?;

        let response = self
            .http_client
            .post(self.endpoint("token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = Self::error_body(response).await;
            return Err(map_sign_in_error(status.as_u16(), &body));
        }

        let token: TokenResponse = response.json().await?;
        let session = Session::from(token);
        *self.session.write().await = Some(session.clone());

        log::info!("Signed in as {}", session.user.email);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.session.write().await.take() else {
            return Ok(());
        };

        let response = self
            .http_client
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        let status = response.status().as_u16();
        // 401 and 404 mean the backend already forgot the session.
        if response.status().is_success() || status == 401 || status == 404 {
            return Ok(());
        }

        let body = Self::error_body(response).await;
        Err(AuthError::Backend {
            status,
            message: error_message(&body),
        })
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let mut guard = self.session.write().await;
        if guard.as_ref().is_some_and(Session::is_expired) {
            log::info!("Stored session expired, discarding it");
            *guard = None;
        }
        Ok(guard.clone())
    }

    async fn restore_session(&self, session: Session) {
        *self.session.write().await = Some(session);
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}

fn session_from_sign_up(body: Value) -> Result<Option<Session>, AuthError> {
    if body.get("access_token").is_none() {
        return Ok(None);
    }
    let token: TokenResponse =
        serde_json::from_value(body).map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
    Ok(Some(token.into()))
}

fn error_code(body: &Value) -> Option<&str> {
    body["error_code"].as_str().or_else(|| body["error"].as_str())
}

fn error_message(body: &Value) -> String {
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| body[*key].as_str())
        .unwrap_or("Unknown error")
        .to_string()
}

pub(crate) fn map_sign_in_error(status: u16, body: &Value) -> AuthError {
    match error_code(body) {
        Some("invalid_credentials" | "invalid_grant") => AuthError::InvalidCredentials,
        // Other coded 400s keep the backend's message
        Some(_) if status == 400 => AuthError::Backend {
            status,
            message: error_message(body),
        },
        _ if status == 400 || status == 401 => AuthError::InvalidCredentials,
        _ => AuthError::Backend {
            status,
            message: error_message(body),
        },
    }
}

pub(crate) fn map_sign_up_error(status: u16, body: &Value) -> AuthError {
    let message = error_message(body);
    match error_code(body) {
        Some("user_already_exists") | Some("email_exists") => AuthError::AccountExists,
        _ if message.contains("already registered") => AuthError::AccountExists,
        Some("weak_password") => AuthError::Validation(message),
        _ if status == 422 => AuthError::AccountExists,
        _ => AuthError::Backend { status, message },
    }
}
