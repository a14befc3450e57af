use super::types::User;
use tokio::sync::watch;

/// Session phase the UI gates its views on.
///
/// Starts in [`SessionPhase::Loading`] and leaves it once the initial session
/// lookup completes. After that it only moves between the two resolved
/// phases on explicit sign-in and sign-out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// The initial session lookup has not completed yet
    #[default]
    Loading,
    /// Lookup finished and nobody is signed in
    Unauthenticated,
    /// A user is signed in
    Authenticated(User),
}

impl SessionPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionPhase::Loading)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionPhase::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Owner of the session phase.
///
/// The phase is published through a [`watch`] channel: consumers read the
/// current value with [`AuthStateManager::phase`] or register for transitions
/// with [`AuthStateManager::subscribe`]. Updates never depend on anyone
/// listening, so a consumer that went away while an authentication call was
/// pending simply misses the late transition.
///
/// # Examples
///
/// ```no_run
/// use server::auth::{AuthStateManager, SessionPhase};
///
/// let state = AuthStateManager::new();
/// let mut rx = state.subscribe();
///
/// state.resolve_initial(None);
/// assert_eq!(*rx.borrow_and_update(), SessionPhase::Unauthenticated);
/// ```
#[derive(Debug)]
pub struct AuthStateManager {
    tx: watch::Sender<SessionPhase>,
}

impl AuthStateManager {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionPhase::Loading);
        Self { tx }
    }

    /// Current phase snapshot.
    pub fn phase(&self) -> SessionPhase {
        self.tx.borrow().clone()
    }

    /// Registers for phase transitions.
    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.tx.subscribe()
    }

    /// Records the outcome of the initial session lookup.
    ///
    /// Only the first resolution leaves the loading phase; later calls, or a
    /// call after an explicit sign-in already resolved the phase, are ignored.
    /// Returns whether the phase changed.
    pub fn resolve_initial(&self, user: Option<User>) -> bool {
        let resolved = self.tx.send_if_modified(|phase| {
            if !phase.is_loading() {
                return false;
            }
            *phase = match user {
                Some(user) => SessionPhase::Authenticated(user),
                None => SessionPhase::Unauthenticated,
            };
            true
        });

        if resolved {
            log::info!("Initial session lookup resolved: {}", self.describe());
        } else {
            log::debug!("Ignoring late session resolution, phase already resolved");
        }
        resolved
    }

    pub fn set_authenticated(&self, user: User) {
        log::info!("Session authenticated for {}", user.email);
        self.tx.send_replace(SessionPhase::Authenticated(user));
    }

    /// Moves to the unauthenticated phase, for sign-out.
    pub fn logout(&self) {
        let previous = self.tx.send_replace(SessionPhase::Unauthenticated);
        if let Some(user) = previous.user() {
            log::info!("Session ended for {}", user.email);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.tx.borrow(), SessionPhase::Authenticated(_))
    }

    pub fn current_user(&self) -> Option<User> {
        self.tx.borrow().user().cloned()
    }

    /// Waits until the phase has left [`SessionPhase::Loading`].
    pub async fn wait_until_resolved(&self) -> SessionPhase {
        let mut rx = self.subscribe();
        match rx.wait_for(|phase| !phase.is_loading()).await {
            Ok(phase) => (*phase).clone(),
            // The sender lives in `self`, so the channel cannot close while we wait.
            Err(_) => self.phase(),
        }
    }

    fn describe(&self) -> &'static str {
        match *self.tx.borrow() {
            SessionPhase::Loading => "loading",
            SessionPhase::Unauthenticated => "unauthenticated",
            SessionPhase::Authenticated(_) => "authenticated",
        }
    }
}

impl Default for AuthStateManager {
    fn default() -> Self {
        Self::new()
    }
}
