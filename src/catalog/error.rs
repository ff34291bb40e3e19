//! Error types for the variant catalog.

use crate::model::{AddOn, BedBaseKind, PillowSize, Size, VariantId};
use thiserror::Error;

/// Problems found while validating a [`VariantTable`](super::VariantTable) at startup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Unsupported variant table version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Empty variant id for {0}")]
    EmptyVariantId(String),

    #[error("Negative or non-finite price {price} for {what}")]
    InvalidPrice { what: String, price: f64 },

    #[error("Fallback rule {from} -> {to} points at a size with no variant")]
    FallbackTargetMissing { from: Size, to: Size },

    #[error("Fallback rules for {kind} loop back to {size}")]
    FallbackCycle { kind: BedBaseKind, size: Size },

    #[error("Pillow size map sends {mattress} to missing {pillow} pillow variant")]
    MissingPillowVariant { mattress: Size, pillow: PillowSize },

    #[error("Invalid quantity bounds: min {min}, max {max}")]
    InvalidQuantityBounds { min: u32, max: u32 },
}

/// Why an add-on could not be resolved to a purchasable variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Unavailable {
    /// Size-dependent add-on requested while no mattress size is known.
    #[error("No mattress size selected for {0}")]
    UnknownSize(AddOn),

    #[error("{0} is not offered for this size")]
    NoVariant(AddOn),

    #[error("{add_on} ({variant_id}) is sold out")]
    SoldOut { add_on: AddOn, variant_id: VariantId },
}
