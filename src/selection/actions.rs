//! Actions understood by the selection actor.
//!
//! Free-text arguments are the raw option values coming from the storefront controls;
//! parsing happens inside the actor so every caller gets the same normalization.

use super::tracker::{BedBaseChoice, BedBaseOption, BundleQuote, PillowChoice};
use crate::catalog::{ResolvedVariant, Unavailable};
use crate::model::{AddOn, BedBaseKind, PillowSize, Size};

#[derive(Debug, Clone)]
pub enum SelectionAction {
    SetMattressSize(String),
    SetPillowEnabled(bool),
    SetPillowSize(String),
    UpdatePillowQuantity(String),
    StepPillowQuantity(i32),
    SetBedBaseEnabled(bool),
    SetBedBaseKind(String),
    ResolveVariant(AddOn),
    BedBaseOptions,
    Quote,
}

/// Results from [`SelectionAction`]s.
#[derive(Debug, Clone)]
pub enum SelectionActionResult {
    MattressSize(Option<Size>),
    Pillow(PillowChoice),
    PillowSize(PillowSize),
    PillowQuantity(u32),
    BedBase(BedBaseChoice),
    BedBaseKind(BedBaseKind),
    Resolved(Result<ResolvedVariant, Unavailable>),
    BedBaseOptions(Vec<BedBaseOption>),
    Quote(BundleQuote),
}
