//! Global constants shared across modules.

pub mod env_vars;
