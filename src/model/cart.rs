//! Cart payloads exchanged with the cart store.

use super::VariantId;
use serde::{Deserialize, Serialize};

/// One insertion request. Serialized the way cart endpoints expect it: `{ "id", "quantity" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineRequest {
    #[serde(rename = "id")]
    pub variant_id: VariantId,
    pub quantity: u32,
}

impl CartLineRequest {
    pub fn new(variant_id: impl Into<VariantId>, quantity: u32) -> Self {
        Self {
            variant_id: variant_id.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "id")]
    pub variant_id: VariantId,
    pub quantity: u32,
}

/// Cart contents as reported by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    pub item_count: u32,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl CartState {
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Total quantity held for `variant_id`, 0 if absent.
    pub fn quantity_of(&self, variant_id: &VariantId) -> u32 {
        self.items
            .iter()
            .filter(|item| &item.variant_id == variant_id)
            .map(|item| item.quantity)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_request_wire_shape() {
        let line = CartLineRequest::new(43549412032688u64, 2);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "43549412032688", "quantity": 2 }));
    }

    #[test]
    fn test_cart_state_tolerates_missing_items() {
        let state: CartState = serde_json::from_str(r#"{ "item_count": 0 }"#).unwrap();
        assert!(state.is_empty());
        assert!(state.items.is_empty());
    }
}
