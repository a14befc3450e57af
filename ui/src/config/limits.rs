/// Smallest accepted HTTP request timeout for backend calls
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Largest accepted HTTP request timeout for backend calls (5 minutes)
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Log levels understood by the logger
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
