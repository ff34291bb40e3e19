use crate::cart::{self, Cart};
use crate::catalog::VariantTable;
use crate::clients::{CartClient, SelectionClient};
use crate::config::{BundleConfig, ConfigError};
use crate::selection;
use crate::submission::BundleSubmitter;
use std::sync::Arc;
use tracing::{error, info};

/// Runs the two actors a product page needs and the workflow that ties them together.
///
/// # Example
///
/// ```rust,ignore
/// let system = BundleSystem::new(&BundleConfig::load("bundle.toml")?)?;
///
/// system.selection_client.set_mattress_size("Queen").await?;
/// system.selection_client.set_pillow_enabled(true).await?;
/// let summary = system.submitter.submit(MainLine::new(44348731326640u64, 1)).await?;
///
/// system.shutdown().await?;
/// ```
pub struct BundleSystem {
    pub selection_client: SelectionClient,
    pub cart_client: CartClient,
    pub submitter: BundleSubmitter<CartClient>,
    table: Arc<VariantTable>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl BundleSystem {
    /// Validates the config and starts everything with an empty cart.
    pub fn new(config: &BundleConfig) -> Result<Self, ConfigError> {
        Self::with_cart(config, Cart::default())
    }

    /// Same as [`BundleSystem::new`] with a preloaded cart store (stock limits, lag).
    pub fn with_cart(config: &BundleConfig, cart: Cart) -> Result<Self, ConfigError> {
        let table = Arc::new(config.build_catalog()?);
        let bounds = config.quantity_bounds()?;
        info!(version = table.version(), "Variant table loaded");

        // Selection needs the table; the cart needs nothing.
        let (selection_actor, selection_client) = selection::new(bounds);
        let (cart_actor, cart_client) = cart::new(cart);
        let selection_handle = tokio::spawn(selection_actor.run(table.clone()));
        let cart_handle = tokio::spawn(cart_actor.run(()));

        let submitter = BundleSubmitter::new(
            selection_client.clone(),
            cart_client.clone(),
            table.clone(),
            config.submit.clone(),
        );

        Ok(Self {
            selection_client,
            cart_client,
            submitter,
            table,
            handles: vec![selection_handle, cart_handle],
        })
    }

    pub fn table(&self) -> &Arc<VariantTable> {
        &self.table
    }

    /// Drops every client, then waits for both actors to drain and stop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down bundle system...");

        // The submitter holds its own client clones.
        drop(self.submitter);
        drop(self.selection_client);
        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Bundle system shutdown complete.");
        Ok(())
    }
}
