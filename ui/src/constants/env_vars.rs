/// Environment variable name constants
/// Names follow the `SECTION__KEY` layout the configuration loader maps onto
/// config.toml sections.
//
// Backend environment variables
pub const BACKEND_URL: &str = "BACKEND__URL";
pub const BACKEND_ANON_KEY: &str = "BACKEND__ANON_KEY";
pub const BACKEND_ON_MISSING_CREDENTIALS: &str = "BACKEND__ON_MISSING_CREDENTIALS";
pub const BACKEND_REQUEST_TIMEOUT_SECS: &str = "BACKEND__REQUEST_TIMEOUT_SECS";

// Application environment variables
pub const STORAGE_DIR: &str = "STORAGE_DIR";
pub const LOGGING_LEVEL: &str = "LOGGING__LEVEL";
pub const LOGGING_FILE: &str = "LOGGING__FILE";
