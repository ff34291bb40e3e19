//! [`ActorState`] implementation that lets a [`StateActor`](crate::framework::StateActor)
//! own the shopper's [`BundleSelection`].

use super::actions::{SelectionAction, SelectionActionResult};
use super::error::SelectionError;
use super::tracker::BundleSelection;
use crate::catalog::VariantTable;
use crate::framework::ActorState;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
impl ActorState for BundleSelection {
    type Action = SelectionAction;
    type ActionResult = SelectionActionResult;
    type Context = Arc<VariantTable>;
    type Error = SelectionError;

    fn label() -> &'static str {
        "BundleSelection"
    }

    async fn handle_action(
        &mut self,
        action: SelectionAction,
        table: &Arc<VariantTable>,
    ) -> Result<SelectionActionResult, SelectionError> {
        let result = match action {
            SelectionAction::SetMattressSize(raw) => {
                SelectionActionResult::MattressSize(self.set_mattress_size(&raw, table))
            }
            SelectionAction::SetPillowEnabled(enabled) => {
                self.set_pillow_enabled(enabled, table);
                SelectionActionResult::Pillow(self.pillow().clone())
            }
            SelectionAction::SetPillowSize(raw) => SelectionActionResult::PillowSize(self.set_pillow_size(&raw)?),
            SelectionAction::UpdatePillowQuantity(raw) => {
                SelectionActionResult::PillowQuantity(self.update_pillow_quantity(&raw))
            }
            SelectionAction::StepPillowQuantity(delta) => {
                SelectionActionResult::PillowQuantity(self.step_pillow_quantity(delta))
            }
            SelectionAction::SetBedBaseEnabled(enabled) => {
                self.set_bed_base_enabled(enabled, table);
                SelectionActionResult::BedBase(self.bed_base().clone())
            }
            SelectionAction::SetBedBaseKind(raw) => {
                SelectionActionResult::BedBaseKind(self.set_bed_base_kind(&raw, table)?)
            }
            SelectionAction::ResolveVariant(add_on) => {
                SelectionActionResult::Resolved(self.resolve_variant(add_on, table))
            }
            SelectionAction::BedBaseOptions => SelectionActionResult::BedBaseOptions(self.bed_base_options(table)),
            SelectionAction::Quote => SelectionActionResult::Quote(self.quote(table)),
        };
        Ok(result)
    }
}
