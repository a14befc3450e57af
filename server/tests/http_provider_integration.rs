use claims::{assert_none, assert_ok, assert_some};
use serde_json::{Value, json};
use server::auth::{
    AuthError, AuthProvider, BackendConfig, Credentials, HttpAuthProvider,
    MissingCredentialsPolicy, SignUpRequest,
};
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

const ANON_KEY: &str = "anon-test-key";

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    url: String,
    apikey: Option<String>,
    authorization: Option<String>,
    body: Value,
}

type Responder = dyn Fn(&RecordedRequest) -> (u16, Value) + Send + Sync;

/// Local stand-in for the hosted auth API that answers with canned bodies.
struct MockBackend {
    server: Arc<tiny_http::Server>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    url: String,
}

impl MockBackend {
    fn start(respond: impl Fn(&RecordedRequest) -> (u16, Value) + Send + Sync + 'static) -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let respond: Arc<Responder> = Arc::new(respond);

        {
            let server = server.clone();
            let requests = requests.clone();
            thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let mut body = String::new();
                    request.as_reader().read_to_string(&mut body).ok();
                    let header = |name: &'static str| {
                        request
                            .headers()
                            .iter()
                            .find(|h| h.field.equiv(name))
                            .map(|h| h.value.as_str().to_string())
                    };

                    let recorded = RecordedRequest {
                        method: request.method().to_string(),
                        url: request.url().to_string(),
                        apikey: header("apikey"),
                        authorization: header("Authorization"),
                        body: serde_json::from_str(&body).unwrap_or(Value::Null),
                    };
                    let (status, payload) = respond(&recorded);
                    requests.lock().unwrap().push(recorded);

                    let text = if payload.is_null() {
                        String::new()
                    } else {
                        payload.to_string()
                    };
                    let response = tiny_http::Response::from_string(text)
                        .with_status_code(status)
                        .with_header(
                            tiny_http::Header::from_bytes(
                                &b"Content-Type"[..],
                                &b"application/json"[..],
                            )
                            .unwrap(),
                        );
                    let _ = request.respond(response);
                }
            });
        }

        Self {
            server,
            requests,
            url: format!("http://{addr}"),
        }
    }

    fn provider(&self) -> HttpAuthProvider {
        HttpAuthProvider::new(&BackendConfig {
            url: Some(self.url.clone()),
            anon_key: Some(ANON_KEY.to_string()),
            on_missing_credentials: MissingCredentialsPolicy::Fail,
            request_timeout_secs: Some(5),
        })
        .unwrap()
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

fn token_body(email: &str) -> Value {
    json!({
        "access_token": "access-1",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "refresh-1",
        "user": {
            "id": "user-1",
            "email": email,
            "user_metadata": { "full_name": "Ann Example" }
        }
    })
}

#[tokio::test]
async fn test_sign_in_and_sign_out_round_trip() {
    let backend = MockBackend::start(|request| match request.url.as_str() {
        "/auth/v1/token?grant_type=password" => (200, token_body("ann@example.com")),
        "/auth/v1/logout" => (204, Value::Null),
        _ => (404, json!({ "msg": "not found" })),
    });
    let provider = backend.provider();

    let session = assert_ok!(
        provider
            .sign_in(&Credentials::new("ann@example.com", "secret1"))
            .await
    );
    assert_eq!(session.access_token, "access-1");
    assert_eq!(session.user.display_name.as_deref(), Some("Ann Example"));
    assert_some!(assert_ok!(provider.current_session().await));

    assert_ok!(provider.sign_out().await);
    assert_none!(assert_ok!(provider.current_session().await));

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);

    let sign_in = &requests[0];
    assert_eq!(sign_in.method, "POST");
    assert_eq!(sign_in.url, "/auth/v1/token?grant_type=password");
    assert_eq!(sign_in.apikey.as_deref(), Some(ANON_KEY));
    assert_eq!(
        sign_in.body,
        json!({ "email": "ann@example.com", "password": "secret1" })
    );

    let sign_out = &requests[1];
    assert_eq!(sign_out.url, "/auth/v1/logout");
    assert_eq!(sign_out.apikey.as_deref(), Some(ANON_KEY));
    assert_eq!(sign_out.authorization.as_deref(), Some("Bearer access-1"));
}

#[tokio::test]
async fn test_rejected_sign_in_maps_to_invalid_credentials() {
    let backend = MockBackend::start(|request| {
        if request.body["password"] == "wrong-pass" {
            (
                400,
                json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" }),
            )
        } else {
            (400, json!({}))
        }
    });
    let provider = backend.provider();

    for password in ["wrong-pass", "other-pass"] {
        let err = provider
            .sign_in(&Credentials::new("ann@example.com", password))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }
    assert_none!(assert_ok!(provider.current_session().await));
}

#[tokio::test]
async fn test_sign_up_posts_display_name_and_maps_conflicts() {
    let backend = MockBackend::start(|request| {
        if request.body["email"] == "taken@example.com" {
            (422, json!({}))
        } else {
            (200, json!({ "id": "user-2", "email": request.body["email"] }))
        }
    });
    let provider = backend.provider();

    let err = provider
        .sign_up(&SignUpRequest::new("taken@example.com", "secret1", "Bo"))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::AccountExists);

    // No session in the response means email confirmation is pending
    let session = assert_ok!(
        provider
            .sign_up(&SignUpRequest::new("new@example.com", "secret1", "New User"))
            .await
    );
    assert_none!(session);

    let requests = backend.requests();
    assert_eq!(requests[1].url, "/auth/v1/signup");
    assert_eq!(requests[1].apikey.as_deref(), Some(ANON_KEY));
    assert_eq!(requests[1].body["data"]["full_name"], "New User");
}

#[tokio::test]
async fn test_unavailable_backend_is_transient() {
    let backend = MockBackend::start(|_| (503, json!({ "msg": "Service unavailable" })));
    let provider = backend.provider();

    let err = provider
        .sign_in(&Credentials::new("ann@example.com", "secret1"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AuthError::Backend {
            status: 503,
            message: "Service unavailable".to_string()
        }
    );
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_local_validation_skips_the_network() {
    let backend = MockBackend::start(|_| (200, token_body("ann@example.com")));
    let provider = backend.provider();

    let err = provider
        .sign_in(&Credentials::new("", "secret1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
    assert!(backend.requests().is_empty());
}
