//! Traversal engine errors.
//!
//! Every variant is a programmer error or an engine bug. Policy refusals
//! (a queue condition saying no, a queue rejecting a negative weight) are
//! ordinary control flow and never surface here.

use super::error_code::{self, GridtraceErrorCode};

/// Errors raised by `Traversal::run` and `Traversal::reset`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraversalError {
    #[error("Traversal is already running")]
    AlreadyRunning,

    #[error("Traversal has already run; call reset() before running it again")]
    AlreadyRun,

    #[error("Internal invariant violated: no context value for '{key}' on the current step")]
    MissingContextValue { key: String },

    #[error("Internal invariant violated: context value for '{key}' has an unexpected type")]
    ContextTypeMismatch { key: String },
}

impl TraversalError {
    /// True for the engine-bug class of errors, false for caller misuse.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::MissingContextValue { .. } | Self::ContextTypeMismatch { .. }
        )
    }
}

impl GridtraceErrorCode for TraversalError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyRunning => error_code::TRAVERSAL_RUNNING,
            Self::AlreadyRun => error_code::TRAVERSAL_ALREADY_RUN,
            Self::MissingContextValue { .. } | Self::ContextTypeMismatch { .. } => {
                error_code::TRAVERSAL_INVARIANT
            }
        }
    }
}
