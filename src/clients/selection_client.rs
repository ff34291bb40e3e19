use crate::catalog::{ResolvedVariant, Unavailable};
use crate::clients::actor_client::ActorClient;
use crate::framework::StateClient;
use crate::model::{AddOn, BedBaseKind, PillowSize, Size};
use crate::selection::{
    BedBaseChoice, BedBaseOption, BundleQuote, BundleSelection, PillowChoice, SelectionAction,
    SelectionActionResult, SelectionError,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the selection actor. One method per storefront control.
#[derive(Clone)]
pub struct SelectionClient {
    inner: StateClient<BundleSelection>,
}

#[async_trait]
impl ActorClient<BundleSelection> for SelectionClient {
    type Error = SelectionError;

    fn inner(&self) -> &StateClient<BundleSelection> {
        &self.inner
    }
}

impl SelectionClient {
    pub fn new(inner: StateClient<BundleSelection>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn set_mattress_size(&self, raw: &str) -> Result<Option<Size>, SelectionError> {
        debug!("Sending request");
        match self.act(SelectionAction::SetMattressSize(raw.to_string())).await? {
            SelectionActionResult::MattressSize(size) => Ok(size),
            _ => unreachable!("SetMattressSize always answers MattressSize"),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_pillow_enabled(&self, enabled: bool) -> Result<PillowChoice, SelectionError> {
        debug!("Sending request");
        match self.act(SelectionAction::SetPillowEnabled(enabled)).await? {
            SelectionActionResult::Pillow(choice) => Ok(choice),
            _ => unreachable!("SetPillowEnabled always answers Pillow"),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_pillow_size(&self, raw: &str) -> Result<PillowSize, SelectionError> {
        debug!("Sending request");
        match self.act(SelectionAction::SetPillowSize(raw.to_string())).await? {
            SelectionActionResult::PillowSize(size) => Ok(size),
            _ => unreachable!("SetPillowSize always answers PillowSize"),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_pillow_quantity(&self, raw: &str) -> Result<u32, SelectionError> {
        debug!("Sending request");
        match self.act(SelectionAction::UpdatePillowQuantity(raw.to_string())).await? {
            SelectionActionResult::PillowQuantity(quantity) => Ok(quantity),
            _ => unreachable!("UpdatePillowQuantity always answers PillowQuantity"),
        }
    }

    #[instrument(skip(self))]
    pub async fn step_pillow_quantity(&self, delta: i32) -> Result<u32, SelectionError> {
        debug!("Sending request");
        match self.act(SelectionAction::StepPillowQuantity(delta)).await? {
            SelectionActionResult::PillowQuantity(quantity) => Ok(quantity),
            _ => unreachable!("StepPillowQuantity always answers PillowQuantity"),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_bed_base_enabled(&self, enabled: bool) -> Result<BedBaseChoice, SelectionError> {
        debug!("Sending request");
        match self.act(SelectionAction::SetBedBaseEnabled(enabled)).await? {
            SelectionActionResult::BedBase(choice) => Ok(choice),
            _ => unreachable!("SetBedBaseEnabled always answers BedBase"),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_bed_base_kind(&self, raw: &str) -> Result<BedBaseKind, SelectionError> {
        debug!("Sending request");
        match self.act(SelectionAction::SetBedBaseKind(raw.to_string())).await? {
            SelectionActionResult::BedBaseKind(kind) => Ok(kind),
            _ => unreachable!("SetBedBaseKind always answers BedBaseKind"),
        }
    }

    #[instrument(skip(self))]
    pub async fn resolve_variant(&self, add_on: AddOn) -> Result<Result<ResolvedVariant, Unavailable>, SelectionError> {
        debug!("Sending request");
        match self.act(SelectionAction::ResolveVariant(add_on)).await? {
            SelectionActionResult::Resolved(resolved) => Ok(resolved),
            _ => unreachable!("ResolveVariant always answers Resolved"),
        }
    }

    #[instrument(skip(self))]
    pub async fn bed_base_options(&self) -> Result<Vec<BedBaseOption>, SelectionError> {
        debug!("Sending request");
        match self.act(SelectionAction::BedBaseOptions).await? {
            SelectionActionResult::BedBaseOptions(options) => Ok(options),
            _ => unreachable!("BedBaseOptions always answers BedBaseOptions"),
        }
    }

    #[instrument(skip(self))]
    pub async fn quote(&self) -> Result<BundleQuote, SelectionError> {
        debug!("Sending request");
        match self.act(SelectionAction::Quote).await? {
            SelectionActionResult::Quote(quote) => Ok(quote),
            _ => unreachable!("Quote always answers Quote"),
        }
    }
}
