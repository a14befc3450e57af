pub mod auth_service;
pub mod notifications;
pub mod session_cache;

pub use auth_service::AuthService;
pub use notifications::{Notification, NotificationKind};
