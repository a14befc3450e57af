//! # Zero-Point Server Library
//!
//! Backend-as-a-service client for the Zero-Point dashboard. This library
//! owns everything that talks to the hosted authentication backend and the
//! session state the UI gates its views on.
//!
//! ## Modules
//!
//! - [`auth`] - Authentication providers, credential checks and session state

pub mod auth;
