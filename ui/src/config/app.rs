use super::{LoggingConfig, defaults, limits::*, validation::ConfigValidationError};
use serde::Deserialize;
use server::auth::BackendConfig;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    storage_dir: Option<PathBuf>,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    backend: BackendConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Some(url) = self.backend.url() {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                errors.push(ConfigValidationError::BackendUrl {
                    configured: url.to_string(),
                });
            }
        }

        let timeout = self.backend.request_timeout().as_secs();
        if !(MIN_REQUEST_TIMEOUT_SECS..=MAX_REQUEST_TIMEOUT_SECS).contains(&timeout) {
            errors.push(ConfigValidationError::RequestTimeout {
                configured: timeout,
                min_limit: MIN_REQUEST_TIMEOUT_SECS,
                max_limit: MAX_REQUEST_TIMEOUT_SECS,
            });
        }

        let level = self.logging.level().to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::LogLevel {
                configured: self.logging.level().to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Directory holding the theme record, the stored session and the
    /// generated stylesheet.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .unwrap_or_else(defaults::default_storage_dir)
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }
}
