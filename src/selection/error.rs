//! Error types for the selection actor.

use crate::catalog::Unavailable;
use crate::model::BedBaseKind;
use thiserror::Error;

/// Errors that can occur while changing the shopper's selection.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SelectionError {
    #[error("Unknown pillow size: {0:?}")]
    UnknownPillowSize(String),

    #[error("Bed base add-on is not enabled")]
    BedBaseDisabled,

    #[error("Unknown bed base type: {0:?}")]
    UnknownBedBaseKind(String),

    /// The kind exists but cannot be bought for the current mattress size.
    #[error("{kind} unavailable: {reason}")]
    KindUnavailable { kind: BedBaseKind, reason: Unavailable },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for SelectionError {
    fn from(msg: String) -> Self {
        SelectionError::ActorCommunicationError(msg)
    }
}
