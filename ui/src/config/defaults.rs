use std::path::PathBuf;

/// Default configuration file embedded in the binary
pub const DEFAULT_CONFIG: &str = include_str!("../../../config.default.toml");

/// Directory name used under the platform config directory
pub const APP_DIR_NAME: &str = "zeropoint";

/// Default log file when none is configured
pub const DEFAULT_LOG_FILE: &str = "zeropoint.log";

/// Storage directory used when `storage_dir` is not configured.
///
/// Falls back to a hidden directory in the working directory on platforms
/// without a config directory.
pub fn default_storage_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR_NAME}")))
}
