//! Checks run on a selection snapshot before anything is sent to the cart.

use super::error::ValidationError;
use super::summary::MainLine;
use crate::selection::BundleSelection;

/// Returns the first broken rule.
///
/// `main` is `None` for an add-ons-only submission, which then needs at least one
/// enabled add-on.
pub fn validate(selection: &BundleSelection, main: Option<&MainLine>) -> Result<(), ValidationError> {
    match main {
        Some(main) if main.quantity == 0 => return Err(ValidationError::InvalidMainQuantity(main.quantity)),
        None if !selection.has_add_ons() => return Err(ValidationError::NothingSelected),
        _ => {}
    }

    let pillow = selection.pillow();
    let bounds = selection.bounds();
    if pillow.enabled && !bounds.contains(pillow.quantity) {
        return Err(ValidationError::InvalidPillowQuantity {
            quantity: pillow.quantity,
            min: bounds.min,
            max: bounds.max,
        });
    }

    if selection.bed_base().enabled {
        if selection.bed_base().kind.is_none() {
            return Err(ValidationError::MissingBedBaseKind);
        }
        if selection.mattress_size().is_none() {
            return Err(ValidationError::UnknownMattressSize);
        }
    }
    Ok(())
}
