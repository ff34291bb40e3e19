//! Purchasable variants.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque storefront variant identifier.
///
/// Stores hand these out as JSON numbers or strings; both deserialize to the same id.
/// Always serialized as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl VariantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl<'de> Deserialize<'de> for VariantId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => VariantId(n.to_string()),
            Raw::Text(s) => VariantId(s),
        })
    }
}

impl From<u64> for VariantId {
    fn from(id: u64) -> Self {
        VariantId(id.to_string())
    }
}

impl From<&str> for VariantId {
    fn from(id: &str) -> Self {
        VariantId(id.to_string())
    }
}

impl From<String> for VariantId {
    fn from(id: String) -> Self {
        VariantId(id)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One purchasable variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub price: f64,
    /// `None` means the store did not report stock; treated as available.
    #[serde(default)]
    pub inventory: Option<u32>,
}

impl Variant {
    pub fn new(id: impl Into<VariantId>, price: f64) -> Self {
        Self {
            id: id.into(),
            price,
            inventory: None,
        }
    }

    pub fn with_inventory(mut self, inventory: u32) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn is_available(&self) -> bool {
        self.inventory != Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_id_accepts_number_or_string() {
        let from_number: VariantId = serde_json::from_str("43549412032688").unwrap();
        let from_string: VariantId = serde_json::from_str("\"43549412032688\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"43549412032688\"");
    }

    #[test]
    fn test_zero_inventory_is_unavailable() {
        assert!(Variant::new(1u64, 10.0).is_available());
        assert!(Variant::new(1u64, 10.0).with_inventory(3).is_available());
        assert!(!Variant::new(1u64, 10.0).with_inventory(0).is_available());
    }
}
