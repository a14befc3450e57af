use crate::services::notifications::{Notification, notify};
use server::auth::AuthError;
use std::fmt::Display;
use std::sync::mpsc::Sender;

/// Application-wide error types.
///
/// Lower layers keep their own typed errors ([`crate::theme::ThemeError`],
/// [`AuthError`], [`crate::config::ConfigValidationError`]) and convert into
/// this enum at the application boundary, where errors become log lines and
/// error toasts.
///
/// # Examples
///
/// ```no_run
/// use zeropoint::error::{AppError, AppResult, ErrorReporter};
/// use zeropoint::theme::{ThemeStore, ThemePatch};
///
/// fn rename(store: &mut ThemeStore, name: &str) -> AppResult<()> {
///     // ThemeError converts into AppError::Theme
///     store.update(ThemePatch::default().brand_name(name))?;
///     Ok(())
/// }
///
/// fn handle(result: AppResult<()>, reporter: &ErrorReporter) {
///     if let Err(error) = result {
///         reporter.report_simple(error, "ThemeCustomizer", "rename");
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration loading and validation errors.
    ///
    /// # Recovery
    /// - Fall back to embedded defaults where possible
    /// - Point the user at the offending key
    Config(String),

    /// Theme persistence, import and export failures.
    ///
    /// The previously active theme stays in effect, so these are reported
    /// and the application continues.
    Theme(String),

    /// Authentication failures and missing backend configuration.
    ///
    /// The session stays unauthenticated and the user can retry.
    Auth(String),

    /// Durable storage that could not be opened or written.
    Storage(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Theme(msg) => write!(f, "Theme Error: {msg}"),
            AppError::Auth(msg) => write!(f, "Authentication Error: {msg}"),
            AppError::Storage(msg) => write!(f, "Storage Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Logged as a warning, shown as an info toast
    Warning,
    /// Logged as an error, shown as an error toast
    Error,
    /// Logged as critical, shown as an error toast; the caller is expected to stop
    Critical,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
    pub user_message: Option<String>,
    pub suggestion: Option<String>,
    pub severity: ErrorSeverity,
}

impl ErrorContext {
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            user_message: None,
            suggestion: None,
            severity: ErrorSeverity::Error,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.user_message = Some(message.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// Turns errors into log lines and toasts.
#[derive(Clone)]
pub struct ErrorReporter {
    tx: Sender<Notification>,
}

impl ErrorReporter {
    pub fn new(tx: Sender<Notification>) -> Self {
        Self { tx }
    }

    /// Report an error with component and operation context
    pub fn report_simple(&self, error: AppError, component: &str, operation: &str) {
        self.report(error, ErrorContext::new(component, operation));
    }

    pub fn report_warning(&self, error: AppError, component: &str, operation: &str) {
        let context = ErrorContext::new(component, operation).with_severity(ErrorSeverity::Warning);
        self.report(error, context);
    }

    /// Report error with full context
    pub fn report(&self, error: AppError, context: ErrorContext) {
        match context.severity {
            ErrorSeverity::Warning => {
                log::warn!("[{}:{}] {}", context.component, context.operation, error);
            }
            ErrorSeverity::Error => {
                log::error!("[{}:{}] {}", context.component, context.operation, error);
            }
            ErrorSeverity::Critical => {
                log::error!(
                    "[CRITICAL] [{}:{}] {}",
                    context.component,
                    context.operation,
                    error
                );
            }
        }

        let message = Self::format_user_message(&error, &context);
        let notification = match context.severity {
            ErrorSeverity::Warning => Notification::info(message),
            ErrorSeverity::Error | ErrorSeverity::Critical => Notification::error(message),
        };

        notify(&self.tx, notification);
    }

    fn format_user_message(error: &AppError, context: &ErrorContext) -> String {
        let mut message = context
            .user_message
            .clone()
            .unwrap_or_else(|| error.to_string());

        if let Some(suggestion) = &context.suggestion {
            message.push_str("\n\n");
            message.push_str(suggestion);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::NotificationKind;
    use crate::theme::ThemeError;
    use std::sync::mpsc;

    #[test]
    fn test_theme_error_converts_to_user_message() {
        let error: AppError = ThemeError::Storage("disk full".to_string()).into();
        match error {
            AppError::Theme(msg) => {
                assert!(msg.contains("disk full"));
                assert!(msg.contains("previous theme is still active"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_auth_error_converts() {
        let error: AppError = AuthError::InvalidCredentials.into();
        assert_eq!(
            error,
            AppError::Auth("Invalid login credentials".to_string())
        );
        assert_eq!(
            error.to_string(),
            "Authentication Error: Invalid login credentials"
        );
    }

    #[test]
    fn test_reporter_sends_toast_by_severity() {
        let (tx, rx) = mpsc::channel();
        let reporter = ErrorReporter::new(tx);

        reporter.report_simple(AppError::Storage("read-only".to_string()), "Store", "update");
        let toast = rx.try_recv().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.message, "Storage Error: read-only");

        reporter.report_warning(AppError::Theme("style".to_string()), "Store", "css");
        assert_eq!(rx.try_recv().unwrap().kind, NotificationKind::Info);
    }

    #[test]
    fn test_reporter_uses_custom_message_and_suggestion() {
        let (tx, rx) = mpsc::channel();
        let reporter = ErrorReporter::new(tx);

        let context = ErrorContext::new("Config", "load")
            .with_message("Configuration could not be loaded")
            .with_suggestion("Check config.toml")
            .with_severity(ErrorSeverity::Critical);
        reporter.report(AppError::Config("bad".to_string()), context);

        let toast = rx.try_recv().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(
            toast.message,
            "Configuration could not be loaded\n\nCheck config.toml"
        );
    }

    #[test]
    fn test_reporter_survives_closed_channel() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let reporter = ErrorReporter::new(tx);
        reporter.report_simple(AppError::Storage("gone".to_string()), "App", "notify");
    }
}
