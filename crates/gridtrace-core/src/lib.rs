//! # gridtrace-core
//!
//! Shared foundation for the gridtrace crates: one error enum per subsystem,
//! layered TOML configuration, `tracing` setup, constants, and the
//! collection aliases used across the workspace.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::GridtraceConfig;
pub use errors::{ConfigError, GridtraceErrorCode, NetworkError, TraversalError};
