use super::app::AppConfig;
use crate::constants::env_vars::{BACKEND_REQUEST_TIMEOUT_SECS, BACKEND_URL, LOGGING_LEVEL};
use crate::error::AppError;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid backend url: {configured} (expected an http:// or https:// URL)")]
    BackendUrl { configured: String },
    #[error("Invalid request_timeout_secs: {configured} (min: {min_limit}, max: {max_limit})")]
    RequestTimeout {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid logging level: {configured}")]
    LogLevel { configured: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::BackendUrl { configured } => {
                format!(
                    "Backend URL is not a web address!\n\n\
                    Your configured value: {configured}\n\n\
                    Please update backend.url in config.toml (or {BACKEND_URL}) to your project URL, \
                    for example https://your-project-id.supabase.co."
                )
            }
            ConfigValidationError::RequestTimeout {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Request timeout out of range!\n\n\
                    Your configured value: {configured} seconds\n\
                    Valid range: {min_limit} - {max_limit} seconds\n\n\
                    Please update request_timeout_secs in config.toml (or {BACKEND_REQUEST_TIMEOUT_SECS}) to a value between {min_limit} and {max_limit}."
                )
            }
            ConfigValidationError::LogLevel { configured } => {
                format!(
                    "Unknown logging level '{configured}'!\n\n\
                    Please set logging.level in config.toml (or {LOGGING_LEVEL}) to one of: trace, debug, info, warn, error."
                )
            }
        }
    }
}

/// Configuration loading result
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
    ValidationError(String),
}

impl ConfigLoadResult {
    pub fn into_result(self) -> Result<AppConfig, AppError> {
        match self {
            ConfigLoadResult::Success(config) => Ok(*config),
            ConfigLoadResult::LoadError(msg)
            | ConfigLoadResult::DeserializeError(msg)
            | ConfigLoadResult::ValidationError(msg) => Err(AppError::Config(msg)),
        }
    }
}
