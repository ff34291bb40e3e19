//! Error types for the submission workflow.

use thiserror::Error;

/// First rule a selection broke. Raised before any cart call is made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid quantity for Mattress: {0}")]
    InvalidMainQuantity(u32),

    #[error("Invalid pillow quantity ({min}-{max} allowed)")]
    InvalidPillowQuantity { quantity: u32, min: u32, max: u32 },

    #[error("Please select a bed base type")]
    MissingBedBaseKind,

    #[error("Unable to determine mattress size for bed base matching")]
    UnknownMattressSize,

    #[error("Please select items to bundle")]
    NothingSelected,

    #[error("Selection unavailable: {0}")]
    SelectionUnavailable(String),
}

/// The only ways a submission can fail as a whole.
///
/// Cart failures are per item and end up in the summary instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    Busy,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
