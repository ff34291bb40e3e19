//! Bundle configuration.
//!
//! Everything that used to be hard-coded per storefront widget (variant ids, the pillow
//! quantity range, submission timing) lives here. Every section is optional; a missing
//! `[catalog]` falls back to the built-in storefront table.

use crate::catalog::defaults::default_table;
use crate::catalog::{CatalogError, FallbackRule, VariantTable, TABLE_VERSION};
use crate::model::{BedBaseKind, PillowSize, Size, Variant, VariantId};
use crate::selection::QuantityBounds;
use crate::submission::SubmitPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Variant the demo submits as the main product line.
    #[serde(default)]
    pub main_variant: Option<VariantId>,

    #[serde(default)]
    pub catalog: Option<CatalogConfig>,

    #[serde(default)]
    pub pillow_quantity: QuantityBounds,

    #[serde(default)]
    pub submit: SubmitPolicy,
}

impl BundleConfig {
    /// Loads a config file, choosing JSON or TOML by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// Builds and validates the variant table. Fails on the first problem found.
    pub fn build_catalog(&self) -> Result<VariantTable, CatalogError> {
        let table = match &self.catalog {
            Some(catalog) => catalog.to_table(),
            None => default_table(),
        };
        table.validated()
    }

    pub fn quantity_bounds(&self) -> Result<QuantityBounds, CatalogError> {
        QuantityBounds::new(self.pillow_quantity.min, self.pillow_quantity.max)
    }
}

/// `[catalog]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub pillows: Vec<PillowEntry>,

    #[serde(default)]
    pub bed_bases: Vec<BedBaseEntry>,

    /// Consulted in order when a bed base has no entry for the mattress size.
    #[serde(default)]
    pub fallbacks: Vec<FallbackRule>,

    /// Overrides for the pillow size that goes with a mattress size.
    #[serde(default)]
    pub pillow_sizes: Vec<PillowSizeEntry>,
}

fn default_version() -> u32 {
    TABLE_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillowEntry {
    pub size: PillowSize,
    pub id: VariantId,
    pub price: f64,
    #[serde(default)]
    pub inventory: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedBaseEntry {
    pub kind: BedBaseKind,
    pub size: Size,
    pub id: VariantId,
    pub price: f64,
    #[serde(default)]
    pub inventory: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillowSizeEntry {
    pub mattress: Size,
    pub pillow: PillowSize,
}

impl CatalogConfig {
    pub fn to_table(&self) -> VariantTable {
        let variant = |id: &VariantId, price: f64, inventory: Option<u32>| Variant {
            id: id.clone(),
            price,
            inventory,
        };

        let mut table = VariantTable::new(self.version);
        for entry in &self.pillows {
            table = table.with_pillow(entry.size, variant(&entry.id, entry.price, entry.inventory));
        }
        for entry in &self.bed_bases {
            table = table.with_bed_base(entry.kind, entry.size, variant(&entry.id, entry.price, entry.inventory));
        }
        for rule in &self.fallbacks {
            table = table.with_fallback(rule.clone());
        }
        for entry in &self.pillow_sizes {
            table = table.with_pillow_size(entry.mattress, entry.pillow);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AddOn;
    use std::time::Duration;

    const SAMPLE: &str = r#"
main_variant = 44348731326640

[pillow_quantity]
min = 1
max = 4

[submit]
settle_delay_ms = 0

[submit.reconcile]
max_refetches = 2
backoff = { strategy = "fixed", delay = 50 }

[catalog]
version = 1

[[catalog.pillows]]
size = "standard"
id = 43549412032688
price = 89.99

[[catalog.bed_bases]]
kind = "power-base"
size = "king"
id = "43518441226416"
price = 899.0

[[catalog.bed_bases]]
kind = "power-base"
size = "Split King"
id = 1
price = 1599.0
inventory = 0

[[catalog.fallbacks]]
from = "california-king"
to = "king"
"#;

    #[test]
    fn test_parse_toml() {
        let config: BundleConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.main_variant, Some(VariantId::from(44348731326640u64)));
        assert_eq!(config.quantity_bounds().unwrap(), QuantityBounds { min: 1, max: 4 });
        assert_eq!(config.submit.settle_delay, Duration::ZERO);
        assert_eq!(config.submit.reconcile.max_refetches, 2);

        let table = config.build_catalog().unwrap();
        let add_on = AddOn::BedBase(BedBaseKind::PowerBase);
        assert!(table.resolve_variant(add_on, Some(Size::CaliforniaKing)).is_ok());
        assert!(table.resolve_variant(add_on, Some(Size::SplitKing)).is_err());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: BundleConfig = toml::from_str("").unwrap();
        assert_eq!(config.pillow_quantity, QuantityBounds::default());
        assert_eq!(config.submit, SubmitPolicy::default());
        assert!(config.build_catalog().is_ok());
    }

    #[test]
    fn test_parse_json() {
        let config: BundleConfig = serde_json::from_str(
            r#"{ "pillow_quantity": { "min": 2, "max": 6 }, "submit": { "settle_delay_ms": 10 } }"#,
        )
        .unwrap();
        assert_eq!(config.quantity_bounds().unwrap().min, 2);
        assert_eq!(config.submit.settle_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_bad_bounds_fail_fast() {
        let mut config = BundleConfig::default();
        config.pillow_quantity = QuantityBounds { min: 0, max: 10 };
        assert!(config.quantity_bounds().is_err());
        config.pillow_quantity = QuantityBounds { min: 5, max: 2 };
        assert!(matches!(
            config.quantity_bounds(),
            Err(CatalogError::InvalidQuantityBounds { min: 5, max: 2 })
        ));
    }

    #[test]
    fn test_bad_fallback_target_fails_fast() {
        let config: BundleConfig = toml::from_str(
            r#"
[catalog]
[[catalog.pillows]]
size = "king"
id = 5
price = 10.0

[[catalog.fallbacks]]
kind = "riser"
from = "twin"
to = "full"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.build_catalog(),
            Err(CatalogError::FallbackTargetMissing { from: Size::Twin, to: Size::Full })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            BundleConfig::load("/nonexistent/bundle.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
