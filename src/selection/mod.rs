//! The Selection State Tracker: the shopper's choices, owned by one actor.

mod actions;
pub mod entity;
pub mod error;
pub mod tracker;

pub use actions::*;
pub use error::*;
pub use tracker::*;

use crate::clients::SelectionClient;
use crate::framework::StateActor;

/// Creates the selection actor and its client.
///
/// The actor still has to be started with the shared table: `tokio::spawn(actor.run(table))`.
pub fn new(bounds: QuantityBounds) -> (StateActor<BundleSelection>, SelectionClient) {
    let (actor, generic_client) = StateActor::new(BundleSelection::new(bounds), 32);
    (actor, SelectionClient::new(generic_client))
}
