use crate::cart::{Cart, CartAction, CartActionResult, CartError};
use crate::clients::actor_client::ActorClient;
use crate::framework::StateClient;
use crate::model::{CartLineRequest, CartState};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// The two calls the submission workflow makes against a cart.
///
/// [`CartClient`] implements it for the in-process store; a remote storefront transport
/// would implement it over HTTP.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn add_item(&self, line: &CartLineRequest) -> Result<CartState, CartError>;

    async fn get_cart(&self) -> Result<CartState, CartError>;
}

/// Client for the in-process cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: StateClient<Cart>,
}

impl CartClient {
    pub fn new(inner: StateClient<Cart>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<CartState, CartError> {
        debug!("Sending request");
        match self.act(CartAction::Clear).await? {
            CartActionResult::Cart(state) => Ok(state),
        }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &StateClient<Cart> {
        &self.inner
    }
}

#[async_trait]
impl CartStore for CartClient {
    #[instrument(skip(self), fields(variant_id = %line.variant_id, quantity = line.quantity))]
    async fn add_item(&self, line: &CartLineRequest) -> Result<CartState, CartError> {
        debug!("Sending request");
        match self.act(CartAction::AddItem(line.clone())).await? {
            CartActionResult::Cart(state) => Ok(state),
        }
    }

    #[instrument(skip(self))]
    async fn get_cart(&self) -> Result<CartState, CartError> {
        debug!("Sending request");
        match self.act(CartAction::Get).await? {
            CartActionResult::Cart(state) => Ok(state),
        }
    }
}
