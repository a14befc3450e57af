use crate::error::AppError;
use thiserror::Error;

/// Errors raised by the theme store and its collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Invalid theme JSON: {0}")]
    Parse(String),

    #[error("Invalid value '{value}' for {field} (expected one of: {allowed})")]
    InvalidValue {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("Theme storage error: {0}")]
    Storage(String),

    #[error("Failed to serialize theme: {0}")]
    Serialize(String),

    #[error("Theme file error for '{path}': {reason}")]
    Io { path: String, reason: String },
}

pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    pub fn user_message(&self) -> String {
        match self {
            ThemeError::Parse(reason) => {
                format!(
                    "The theme could not be imported.\n\n\
                    Reason: {reason}\n\n\
                    Please select a file exported from the theme customizer."
                )
            }
            ThemeError::InvalidValue {
                field,
                value,
                allowed,
            } => {
                format!(
                    "Invalid theme value for '{field}': '{value}'\n\n\
                    Allowed values: {allowed}"
                )
            }
            ThemeError::Storage(reason) => {
                format!(
                    "The theme could not be saved.\n\n\
                    Reason: {reason}\n\n\
                    Your previous theme is still active."
                )
            }
            ThemeError::Serialize(reason) => format!("The theme could not be exported: {reason}"),
            ThemeError::Io { path, reason } => {
                format!(
                    "Could not access theme file '{path}'\n\n\
                    Reason: {reason}"
                )
            }
        }
    }
}

impl From<ThemeError> for AppError {
    fn from(error: ThemeError) -> Self {
        AppError::Theme(error.user_message())
    }
}
