//! GridtraceErrorCode trait for stable, machine-readable error codes.

/// Trait giving every gridtrace error a stable code string.
/// Callers that surface errors across a process boundary (logs, RPC
/// status details) key on the code rather than the message text.
pub trait GridtraceErrorCode {
    /// Returns the error code string (e.g., "TRAVERSAL_ALREADY_RUN").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted coded string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Traversal precondition violations.
pub const TRAVERSAL_RUNNING: &str = "TRAVERSAL_RUNNING";
pub const TRAVERSAL_ALREADY_RUN: &str = "TRAVERSAL_ALREADY_RUN";

// Traversal internal invariants.
pub const TRAVERSAL_INVARIANT: &str = "TRAVERSAL_INVARIANT";

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
