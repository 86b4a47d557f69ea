//! Network model and network trace errors.

use super::error_code::{self, GridtraceErrorCode};
use super::TraversalError;

/// Errors raised while building a network model or running a network trace.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("Unknown equipment: {mrid}")]
    UnknownEquipment { mrid: String },

    #[error("Unknown terminal {sequence_number} on {mrid}")]
    UnknownTerminal { mrid: String, sequence_number: usize },

    #[error("Duplicate equipment mRID: {mrid}")]
    DuplicateEquipment { mrid: String },

    #[error("Terminal {sequence_number} on {mrid} is already connected to {node}")]
    AlreadyConnected {
        mrid: String,
        sequence_number: usize,
        node: String,
    },

    #[error("Traversal error: {0}")]
    Traversal(#[from] TraversalError),
}

impl GridtraceErrorCode for NetworkError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Traversal(e) => e.error_code(),
            _ => error_code::NETWORK_ERROR,
        }
    }
}
