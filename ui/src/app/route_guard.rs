//! Decides which view tree is shown for a route and the session phase.

use server::auth::{SessionPhase, User};
use std::fmt;
use tokio::sync::watch;

/// Known application paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Dashboard,
    VbaGenerator,
    ThemeCustomizer,
    About,
    SignIn,
    SignUp,
    NotFound(String),
}

impl Route {
    /// Parses a path. Query strings, fragments and a trailing slash are ignored.
    pub fn parse(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let normalized = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match normalized {
            "/" => Route::Home,
            "/dashboard" => Route::Dashboard,
            "/vba" => Route::VbaGenerator,
            "/theme" => Route::ThemeCustomizer,
            "/about" => Route::About,
            "/signin" => Route::SignIn,
            "/signup" => Route::SignUp,
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::Dashboard => "/dashboard",
            Route::VbaGenerator => "/vba",
            Route::ThemeCustomizer => "/theme",
            Route::About => "/about",
            Route::SignIn => "/signin",
            Route::SignUp => "/signup",
            Route::NotFound(path) => path,
        }
    }

    /// Routes that require a signed-in user.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Home
                | Route::Dashboard
                | Route::VbaGenerator
                | Route::ThemeCustomizer
                | Route::About
        )
    }

    pub fn is_auth_form(&self) -> bool {
        matches!(self, Route::SignIn | Route::SignUp)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What gets rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Waiting indicator while the initial session check runs
    Loading,
    SignIn,
    SignUp,
    /// The protected tree, opened at `route`
    Protected { user: User, route: Route },
    NotFound(String),
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Loading => write!(f, "loading"),
            View::SignIn => write!(f, "sign-in"),
            View::SignUp => write!(f, "sign-up"),
            View::Protected { user, route } => write!(f, "{route} (as {})", user.label()),
            View::NotFound(path) => write!(f, "not found: {path}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    pub view: View,
    /// Set when the requested route is replaced by another one
    pub redirect_to: Option<Route>,
}

impl GuardDecision {
    fn render(view: View) -> Self {
        Self {
            view,
            redirect_to: None,
        }
    }

    fn redirect(view: View, to: Route) -> Self {
        Self {
            view,
            redirect_to: Some(to),
        }
    }
}

/// Picks the view for `requested` in the given phase.
///
/// While loading only the waiting indicator is shown. Signed-out users only
/// ever see the sign-in and sign-up views; every other route, unknown paths
/// included, sends them to sign-in. Signed-in users asking for an auth form go to the dashboard.
pub fn guard(phase: &SessionPhase, requested: &Route) -> GuardDecision {
    match phase {
        SessionPhase::Loading => GuardDecision::render(View::Loading),

        SessionPhase::Unauthenticated => match requested {
            Route::SignIn => GuardDecision::render(View::SignIn),
            Route::SignUp => GuardDecision::render(View::SignUp),
            _ => GuardDecision::redirect(View::SignIn, Route::SignIn),
        },

        SessionPhase::Authenticated(user) => match requested {
            Route::SignIn | Route::SignUp => GuardDecision::redirect(
                View::Protected {
                    user: user.clone(),
                    route: Route::Dashboard,
                },
                Route::Dashboard,
            ),
            Route::NotFound(path) => GuardDecision::render(View::NotFound(path.clone())),
            Route::Home => GuardDecision::render(View::Protected {
                user: user.clone(),
                route: Route::Dashboard,
            }),
            route => GuardDecision::render(View::Protected {
                user: user.clone(),
                route: route.clone(),
            }),
        },
    }
}

/// Re-evaluates the guard whenever the session phase changes.
pub struct RouteGuard {
    phases: watch::Receiver<SessionPhase>,
    route: Route,
}

impl RouteGuard {
    pub fn new(phases: watch::Receiver<SessionPhase>, route: Route) -> Self {
        Self { phases, route }
    }

    pub fn navigate(&mut self, route: Route) -> GuardDecision {
        self.route = route;
        self.decision()
    }

    pub fn decision(&self) -> GuardDecision {
        guard(&self.phases.borrow(), &self.route)
    }

    /// Waits for the next phase change and returns the new decision.
    ///
    /// Returns `None` once the session state is gone.
    pub async fn changed(&mut self) -> Option<GuardDecision> {
        self.phases.changed().await.ok()?;
        let decision = self.decision();
        if let Some(target) = &decision.redirect_to {
            self.route = target.clone();
        }
        Some(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            email: "ann@example.com".to_string(),
            display_name: Some("Ann".to_string()),
        }
    }

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/theme/"), Route::ThemeCustomizer);
        assert_eq!(Route::parse("/vba?tab=code"), Route::VbaGenerator);
        assert_eq!(Route::parse("/signin#top"), Route::SignIn);
        assert_eq!(
            Route::parse("/contact"),
            Route::NotFound("/contact".to_string())
        );
        assert_eq!(Route::parse("/dashboard").path(), "/dashboard");
    }

    #[test]
    fn test_loading_only_shows_waiting_indicator() {
        for path in ["/", "/dashboard", "/signin", "/nope"] {
            let decision = guard(&SessionPhase::Loading, &Route::parse(path));
            assert_eq!(decision.view, View::Loading);
            assert_eq!(decision.redirect_to, None);
        }
    }

    #[test]
    fn test_unauthenticated_sees_auth_forms_only() {
        let phase = SessionPhase::Unauthenticated;

        assert_eq!(guard(&phase, &Route::SignUp).view, View::SignUp);
        for route in [
            Route::Home,
            Route::Dashboard,
            Route::ThemeCustomizer,
            Route::parse("/contact"),
        ] {
            let decision = guard(&phase, &route);
            assert_eq!(decision.view, View::SignIn);
            assert_eq!(decision.redirect_to, Some(Route::SignIn));
        }
    }

    #[test]
    fn test_authenticated_is_sent_away_from_auth_forms() {
        let phase = SessionPhase::Authenticated(user());

        let decision = guard(&phase, &Route::SignIn);
        assert_eq!(decision.redirect_to, Some(Route::Dashboard));

        let decision = guard(&phase, &Route::VbaGenerator);
        assert_eq!(
            decision.view,
            View::Protected {
                user: user(),
                route: Route::VbaGenerator
            }
        );
        assert_eq!(decision.view.to_string(), "/vba (as Ann)");
    }

    #[tokio::test]
    async fn test_guard_follows_phase_changes() {
        let (tx, rx) = watch::channel(SessionPhase::Loading);
        let mut route_guard = RouteGuard::new(rx, Route::Dashboard);
        assert_eq!(route_guard.decision().view, View::Loading);

        tx.send(SessionPhase::Unauthenticated).unwrap();
        let decision = route_guard.changed().await.unwrap();
        assert_eq!(decision.view, View::SignIn);

        // The redirect moved the guard to sign-in, so signing in lands on the dashboard
        tx.send(SessionPhase::Authenticated(user())).unwrap();
        let decision = route_guard.changed().await.unwrap();
        assert_eq!(decision.redirect_to, Some(Route::Dashboard));

        drop(tx);
        assert!(route_guard.changed().await.is_none());
    }
}
