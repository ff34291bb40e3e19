//! The cart store's state and its [`ActorState`] implementation.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::framework::ActorState;
use crate::model::{CartItem, CartLineRequest, CartState, VariantId};
use async_trait::async_trait;
use std::collections::HashMap;

/// In-process stand-in for a remote cart.
///
/// Variants are unlimited unless given a stock level with [`Cart::with_stock`].
/// [`Cart::with_stale_reads`] makes the next reads after an add report an empty cart,
/// the way a storefront cart endpoint sometimes lags behind its own add endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    stock: HashMap<VariantId, u32>,
    stale_reads: u32,
    pending_stale: u32,
}

impl Cart {
    pub fn with_stock(mut self, variant_id: impl Into<VariantId>, available: u32) -> Self {
        self.stock.insert(variant_id.into(), available);
        self
    }

    pub fn with_stale_reads(mut self, reads: u32) -> Self {
        self.stale_reads = reads;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> CartState {
        CartState {
            item_count: self.items.iter().map(|item| item.quantity).sum(),
            items: self.items.clone(),
        }
    }

    fn add(&mut self, line: CartLineRequest) -> Result<CartState, CartError> {
        if line.quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        if let Some(available) = self.stock.get_mut(&line.variant_id) {
            if *available < line.quantity {
                return Err(CartError::InsufficientStock {
                    variant_id: line.variant_id,
                    requested: line.quantity,
                    available: *available,
                });
            }
            *available -= line.quantity;
        }

        match self.items.iter_mut().find(|item| item.variant_id == line.variant_id) {
            Some(item) => item.quantity += line.quantity,
            None => self.items.push(CartItem {
                variant_id: line.variant_id,
                quantity: line.quantity,
            }),
        }
        self.pending_stale = self.stale_reads;
        Ok(self.state())
    }

    fn read(&mut self) -> CartState {
        if self.pending_stale > 0 {
            self.pending_stale -= 1;
            return CartState::default();
        }
        self.state()
    }
}

#[async_trait]
impl ActorState for Cart {
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = ();
    type Error = CartError;

    fn label() -> &'static str {
        "Cart"
    }

    async fn handle_action(&mut self, action: CartAction, _ctx: &()) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::AddItem(line) => self.add(line).map(CartActionResult::Cart),
            CartAction::Get => Ok(CartActionResult::Cart(self.read())),
            CartAction::Clear => {
                self.items.clear();
                self.pending_stale = 0;
                Ok(CartActionResult::Cart(self.state()))
            }
        }
    }
}
