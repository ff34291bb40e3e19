//! The Cart Submission Workflow.

use super::error::{SubmitError, ValidationError};
use super::policy::SubmitPolicy;
use super::summary::{
    BundleSummary, CartUpdated, ItemFailure, LineLabel, MainLine, SubmittedLine, UnresolvedAddOn, WorkflowPhase,
};
use super::validation::validate;
use crate::catalog::VariantTable;
use crate::clients::{ActorClient, CartStore, SelectionClient};
use crate::model::{AddOn, CartLineRequest, CartState};
use crate::selection::BundleSelection;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, instrument, warn};

const EVENT_CAPACITY: usize = 16;

/// Turns the shopper's selection into cart lines and submits them one at a time.
///
/// Clones share the busy flag, the phase channel and the event channel, so a second
/// trigger from any clone is refused while one submission is running.
pub struct BundleSubmitter<S: CartStore> {
    selection: SelectionClient,
    store: Arc<S>,
    table: Arc<VariantTable>,
    policy: SubmitPolicy,
    busy: Arc<AtomicBool>,
    phase: Arc<watch::Sender<WorkflowPhase>>,
    events: broadcast::Sender<CartUpdated>,
}

impl<S: CartStore> Clone for BundleSubmitter<S> {
    fn clone(&self) -> Self {
        Self {
            selection: self.selection.clone(),
            store: self.store.clone(),
            table: self.table.clone(),
            policy: self.policy.clone(),
            busy: self.busy.clone(),
            phase: self.phase.clone(),
            events: self.events.clone(),
        }
    }
}

/// Holds the busy flag for one submission and puts the workflow back to Idle when dropped.
struct InFlight<'a> {
    busy: &'a AtomicBool,
    phase: &'a watch::Sender<WorkflowPhase>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.phase.send_replace(WorkflowPhase::Idle);
        self.busy.store(false, Ordering::Release);
    }
}

type PlannedLine = (LineLabel, CartLineRequest);

impl<S: CartStore> BundleSubmitter<S> {
    pub fn new(selection: SelectionClient, store: S, table: Arc<VariantTable>, policy: SubmitPolicy) -> Self {
        let (phase, _) = watch::channel(WorkflowPhase::Idle);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            selection,
            store: Arc::new(store),
            table,
            policy,
            busy: Arc::new(AtomicBool::new(false)),
            phase: Arc::new(phase),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartUpdated> {
        self.events.subscribe()
    }

    pub fn phase(&self) -> WorkflowPhase {
        *self.phase.borrow()
    }

    pub fn watch_phase(&self) -> watch::Receiver<WorkflowPhase> {
        self.phase.subscribe()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds the main product followed by every enabled add-on.
    #[instrument(skip(self))]
    pub async fn submit(&self, main: MainLine) -> Result<BundleSummary, SubmitError> {
        self.run(Some(main)).await
    }

    /// Adds only the enabled add-ons.
    #[instrument(skip(self))]
    pub async fn submit_add_ons(&self) -> Result<BundleSummary, SubmitError> {
        self.run(None).await
    }

    async fn run(&self, main: Option<MainLine>) -> Result<BundleSummary, SubmitError> {
        let _in_flight = self.begin()?;

        self.enter(WorkflowPhase::Validating);
        let selection = self
            .selection
            .snapshot()
            .await
            .map_err(|e| ValidationError::SelectionUnavailable(e.to_string()))?;
        if let Err(e) = validate(&selection, main.as_ref()) {
            info!(error = %e, "Submission rejected");
            return Err(e.into());
        }

        let (lines, unresolved) = self.plan(&selection, main);
        let (added, failed, last_cart) = self.execute(lines).await;

        self.enter(WorkflowPhase::Reconciling);
        let (final_cart, consistent) = self.reconcile(!added.is_empty(), last_cart).await;

        self.enter(WorkflowPhase::Broadcasting);
        let event = CartUpdated {
            cart: final_cart.clone(),
            consistent,
        };
        if self.events.send(event).is_err() {
            debug!("No cart listeners");
        }

        info!(
            added = added.len(),
            failed = failed.len(),
            unresolved = unresolved.len(),
            consistent,
            "Submission finished"
        );
        Ok(BundleSummary {
            added,
            failed,
            unresolved,
            final_cart,
            consistent,
        })
    }

    fn begin(&self) -> Result<InFlight<'_>, SubmitError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Submission already in progress");
            return Err(SubmitError::Busy);
        }
        Ok(InFlight {
            busy: &self.busy,
            phase: &self.phase,
        })
    }

    fn enter(&self, phase: WorkflowPhase) {
        debug!(phase = ?phase, "Workflow phase");
        self.phase.send_replace(phase);
    }

    /// Orders lines Mattress, Pillow, Bed Base and drops add-ons that do not resolve.
    fn plan(&self, selection: &BundleSelection, main: Option<MainLine>) -> (Vec<PlannedLine>, Vec<UnresolvedAddOn>) {
        let mut lines = Vec::new();
        let mut unresolved = Vec::new();

        if let Some(main) = main {
            lines.push((LineLabel::Mattress, CartLineRequest::new(main.variant_id, main.quantity)));
        }

        let pillow = selection.pillow();
        let mut add_ons = Vec::new();
        if pillow.enabled {
            add_ons.push((AddOn::Pillow(pillow.size), pillow.quantity));
        }
        if let (true, Some(kind)) = (selection.bed_base().enabled, selection.bed_base().kind) {
            add_ons.push((AddOn::BedBase(kind), 1));
        }

        for (add_on, quantity) in add_ons {
            let label = LineLabel::from(add_on.add_on_type());
            match selection.resolve_variant(add_on, &self.table) {
                Ok(resolved) => lines.push((label, CartLineRequest::new(resolved.variant.id, quantity))),
                Err(reason) => {
                    warn!(%label, reason = %reason, "Add-on left out");
                    unresolved.push(UnresolvedAddOn { label, reason });
                }
            }
        }
        (lines, unresolved)
    }

    async fn execute(&self, lines: Vec<PlannedLine>) -> (Vec<SubmittedLine>, Vec<ItemFailure>, Option<CartState>) {
        let mut added = Vec::new();
        let mut failed = Vec::new();
        let mut last_cart = None;

        for (index, (label, line)) in lines.into_iter().enumerate() {
            if index > 0 && !self.policy.settle_delay.is_zero() {
                tokio::time::sleep(self.policy.settle_delay).await;
            }
            self.enter(WorkflowPhase::Submitting(index));
            debug!(%label, payload = ?line, "Adding to cart");

            match self.store.add_item(&line).await {
                Ok(cart) => {
                    info!(%label, variant_id = %line.variant_id, quantity = line.quantity, "Added to cart");
                    last_cart = Some(cart);
                    added.push(SubmittedLine { label, line });
                }
                Err(error) => {
                    warn!(%label, variant_id = %line.variant_id, error = %error, "Failed to add to cart");
                    failed.push(ItemFailure { label, line, error });
                }
            }
        }
        (added, failed, last_cart)
    }

    /// Reads the cart back, refetching while it still looks empty after successful adds.
    async fn reconcile(&self, any_added: bool, last_cart: Option<CartState>) -> (Option<CartState>, bool) {
        let policy = &self.policy.reconcile;
        let mut attempt = 0;
        loop {
            match self.store.get_cart().await {
                Ok(cart) if !any_added || cart.item_count > 0 => return (Some(cart), true),
                Ok(cart) if attempt >= policy.max_refetches => {
                    warn!(refetches = attempt, "Cart still empty after adds");
                    return (Some(cart), false);
                }
                Ok(_) => {
                    debug!(attempt, "Cart reports no items, refetching");
                }
                Err(e) => {
                    warn!(error = %e, "Cart fetch failed, using last add response");
                    let consistent = last_cart.as_ref().is_some_and(|cart| cart.item_count > 0);
                    return (last_cart, consistent);
                }
            }
            tokio::time::sleep(policy.backoff.delay_for_attempt(attempt)).await;
            attempt += 1;
        }
    }
}
