//! Actions for the in-process cart store.

use crate::model::{CartLineRequest, CartState};

#[derive(Debug, Clone)]
pub enum CartAction {
    AddItem(CartLineRequest),
    /// Reads the cart as a storefront `cart.js` fetch would.
    Get,
    Clear,
}

/// Every cart action answers with the resulting cart.
#[derive(Debug, Clone)]
pub enum CartActionResult {
    Cart(CartState),
}
