//! Error handling for gridtrace.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod network_error;
pub mod traversal_error;

pub use config_error::ConfigError;
pub use error_code::GridtraceErrorCode;
pub use network_error::NetworkError;
pub use traversal_error::TraversalError;
