use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

pub mod app;
pub mod defaults;
pub mod limits;
pub mod validation;

pub use app::AppConfig;
pub use validation::{ConfigLoadResult, ConfigValidationError};

/// Name of the optional user configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Loads configuration from every layer.
///
/// Layers, lowest precedence first:
/// 1. defaults embedded in the binary
/// 2. `config_file`, or `config.toml` in the working directory when present
/// 3. environment variables (after `.env`), `__` separating section and key
pub fn load_config(config_file: Option<&Path>) -> ConfigLoadResult {
    dotenv::dotenv().ok();
    build_config(config_file, true)
}

/// Same as [`load_config`] without the environment layer.
pub fn load_config_without_env(config_file: Option<&Path>) -> ConfigLoadResult {
    build_config(config_file, false)
}

fn build_config(config_file: Option<&Path>, include_env: bool) -> ConfigLoadResult {
    let mut builder = Config::builder()
        .add_source(File::from_str(defaults::DEFAULT_CONFIG, FileFormat::Toml));

    builder = match config_file {
        // An explicitly named file must exist
        Some(path) => builder.add_source(File::from(path).format(FileFormat::Toml)),
        None => builder.add_source(File::with_name(CONFIG_FILE_NAME).required(false)),
    };

    if include_env {
        builder = builder.add_source(Environment::default().separator("__"));
    }

    let config = match builder.build() {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your config.toml file and environment variables."
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => {
            if let Err(validation_errors) = app_config.validate() {
                let error_messages: Vec<String> =
                    validation_errors.iter().map(|e| e.user_message()).collect();
                return ConfigLoadResult::ValidationError(format!(
                    "Configuration validation failed:\n{}",
                    error_messages.join("\n\n")
                ));
            }
            ConfigLoadResult::Success(Box::new(app_config))
        }
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref().filter(|file| !file.trim().is_empty())
    }
}
