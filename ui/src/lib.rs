//! # Zero-Point Library
//!
//! Theme configuration store and session-gated navigation for the Zero-Point
//! dashboard, with a command-line front end.
//!
//! ## Features
//!
//! - Persistent theme with partial updates, reset, JSON export and import
//! - Stylesheet generation into a single style slot
//! - Route guard driven by a three-phase session state
//! - Sign-in and sign-up against a hosted auth backend, with toast notifications
//! - Layered configuration and file logging
//!
//! ## Modules
//!
//! - [`app`] - Route guard and view selection
//! - [`config`] - Configuration loading and validation
//! - [`constants`] - Environment variable names
//! - [`error`] - Error types and centralized error reporting
//! - [`logger`] - Logging configuration
//! - [`services`] - Authentication service and notifications
//! - [`theme`] - Theme store, storage and stylesheet synthesis
//! - [`validation`] - Validation trait
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod services;
pub mod theme;
pub mod validation;

// Re-export commonly used types for easier access in tests
pub use error::AppError;

// Re-export validation trait for broader use
pub use validation::Validator;
