//! Error types for the cart store.

use crate::model::VariantId;
use thiserror::Error;

/// Errors a cart store can report for a single request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Insufficient stock for {variant_id}: requested {requested}, available {available}")]
    InsufficientStock {
        variant_id: VariantId,
        requested: u32,
        available: u32,
    },

    /// The store could not be reached or answered with garbage.
    #[error("Cart request failed: {0}")]
    Transport(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
