pub mod auth_setup;
pub mod auth_state;
pub mod errors;
pub mod http_provider;
pub mod provider;
pub mod types;
pub mod unconfigured;

pub use auth_setup::create_auth_provider;
pub use auth_state::{AuthStateManager, SessionPhase};
pub use errors::AuthError;
pub use http_provider::HttpAuthProvider;
pub use provider::AuthProvider;
pub use types::{BackendConfig, Credentials, MissingCredentialsPolicy, Session, SignUpRequest, User};
pub use unconfigured::UnconfiguredAuthProvider;
