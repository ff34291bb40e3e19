//! Bundle & Save demo.
//!
//! Plays one shopper session against the in-process cart: picks a size, enables both
//! add-ons, submits, then shows a partial failure caused by limited pillow stock.

use bundle_save::cart::Cart;
use bundle_save::config::BundleConfig;
use bundle_save::lifecycle::{setup_tracing, BundleSystem};
use bundle_save::model::{AddOn, PillowSize, VariantId};
use bundle_save::selection::SelectionError;
use bundle_save::submission::MainLine;
use tracing::{info, warn, Instrument};

const DEFAULT_MAIN_VARIANT: u64 = 44348731326640;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => BundleConfig::load(&path).map_err(|e| e.to_string())?,
        None => BundleConfig::default(),
    };
    let main_variant = config
        .main_variant
        .clone()
        .unwrap_or_else(|| VariantId::from(DEFAULT_MAIN_VARIANT));

    // Only two King pillows in stock so the second submission fails on the pillow line.
    let king_pillow = config
        .build_catalog()
        .map_err(|e| e.to_string())?
        .resolve_variant(AddOn::Pillow(PillowSize::King), None)
        .map_err(|e| e.to_string())?
        .variant
        .id;
    let system = BundleSystem::with_cart(&config, Cart::default().with_stock(king_pillow, 2))
        .map_err(|e| e.to_string())?;
    let mut updates = system.submitter.subscribe();

    let span = tracing::info_span!("shopper");
    async {
        let selection = &system.selection_client;
        let size = selection.set_mattress_size("King").await?;
        info!(size = ?size, "Mattress size selected");
        selection.set_pillow_enabled(true).await?;
        selection.update_pillow_quantity("2").await?;
        selection.set_bed_base_enabled(true).await?;
        selection.set_bed_base_kind("adjustable").await?;

        let quote = selection.quote().await?;
        info!(total = quote.total, "Bundle quoted");
        for option in selection.bed_base_options().await? {
            info!(kind = %option.kind, selectable = option.selectable, price = ?option.price, "Bed base option");
        }
        Ok::<(), SelectionError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    for round in 1..=2 {
        let span = tracing::info_span!("checkout", round);
        let result = system
            .submitter
            .submit(MainLine::new(main_variant.clone(), 1))
            .instrument(span)
            .await;

        match result {
            Ok(summary) => {
                info!(
                    added = ?summary.added_labels(),
                    failed = ?summary.failed_labels(),
                    consistent = summary.consistent,
                    "Bundle submitted"
                );
                if let Ok(event) = updates.try_recv() {
                    info!(item_count = event.cart.map(|c| c.item_count), "cartUpdated");
                }
            }
            Err(e) => warn!(error = %e, "Bundle rejected"),
        }
    }

    system.shutdown().await?;
    info!("Demo completed");
    Ok(())
}
