//! In-process cart store, reached through [`CartClient`](crate::clients::CartClient).

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::Cart;
pub use error::*;

use crate::clients::CartClient;
use crate::framework::StateActor;

/// Creates a cart actor and its client. Start it with `tokio::spawn(actor.run(()))`.
pub fn new(initial: Cart) -> (StateActor<Cart>, CartClient) {
    let (actor, generic_client) = StateActor::new(initial, 32);
    (actor, CartClient::new(generic_client))
}
