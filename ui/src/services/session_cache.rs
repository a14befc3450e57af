use crate::error::{AppError, AppResult};
use crate::theme::KeyValueStore;
use server::auth::Session;

/// Key the signed-in session is kept under between runs.
pub const SESSION_KEY: &str = "zero-point-session";

/// Reads the stored session. A missing or unreadable entry yields `None`.
pub fn load_session(storage: &dyn KeyValueStore) -> Option<Session> {
    let text = match storage.get_item(SESSION_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Could not read stored session: {e}");
            return None;
        }
    };

    serde_json::from_str(&text)
        .inspect_err(|e| log::warn!("Ignoring unreadable stored session: {e}"))
        .ok()
}

pub fn save_session(storage: &mut dyn KeyValueStore, session: &Session) -> AppResult<()> {
    let text = serde_json::to_string(session).map_err(|e| AppError::Storage(e.to_string()))?;
    storage
        .set_item(SESSION_KEY, &text)
        .map_err(|e| AppError::Storage(e.to_string()))
}

pub fn clear_session(storage: &mut dyn KeyValueStore) -> AppResult<()> {
    storage
        .remove_item(SESSION_KEY)
        .map_err(|e| AppError::Storage(e.to_string()))
}
