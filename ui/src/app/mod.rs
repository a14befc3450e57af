//! # Application Module
//!
//! Session-aware navigation for the dashboard.
//!
//! - [`route_guard`] - maps a requested path and the current
//!   [`server::auth::SessionPhase`] to the view that is rendered
//!
//! ## Usage
//!
//! ```no_run
//! use zeropoint::app::route_guard::{Route, RouteGuard};
//! use server::auth::AuthStateManager;
//!
//! # async fn run() {
//! let auth_state = AuthStateManager::new();
//! let mut guard = RouteGuard::new(auth_state.subscribe(), Route::parse("/theme"));
//!
//! while let Some(decision) = guard.changed().await {
//!     println!("render {}", decision.view);
//! }
//! # }
//! ```

pub mod route_guard;

pub use route_guard::{GuardDecision, Route, RouteGuard, View, guard};
