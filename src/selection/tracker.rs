//! The shopper's bundle choices and every rule that keeps them consistent.
//!
//! [`BundleSelection`] is plain data with synchronous methods; the selection actor
//! owns one instance and calls into it, and the submission workflow reads snapshots.

use super::error::SelectionError;
use crate::catalog::{CatalogError, ResolvedVariant, Unavailable, VariantTable};
use crate::model::{AddOn, AddOnType, BedBaseKind, PillowSize, Size, Variant};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inclusive pillow quantity range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantityBounds {
    pub min: u32,
    pub max: u32,
}

impl Default for QuantityBounds {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

impl QuantityBounds {
    pub fn new(min: u32, max: u32) -> Result<Self, CatalogError> {
        if min == 0 || min > max {
            return Err(CatalogError::InvalidQuantityBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, quantity: u32) -> bool {
        (self.min..=self.max).contains(&quantity)
    }

    pub fn clamp(&self, quantity: i64) -> u32 {
        quantity.clamp(self.min as i64, self.max as i64) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PillowChoice {
    pub enabled: bool,
    pub size: PillowSize,
    pub quantity: u32,
}

impl PillowChoice {
    fn reset(bounds: QuantityBounds) -> Self {
        Self {
            enabled: false,
            size: PillowSize::Standard,
            quantity: bounds.min,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BedBaseChoice {
    pub enabled: bool,
    pub kind: Option<BedBaseKind>,
    /// Kind the shopper picked before a size change made it unavailable.
    pub stale_kind: Option<BedBaseKind>,
}

/// One bed-base control as the UI should render it for the current size.
#[derive(Debug, Clone, PartialEq)]
pub struct BedBaseOption {
    pub kind: BedBaseKind,
    pub selected: bool,
    pub selectable: bool,
    pub price: Option<f64>,
    pub unavailable: Option<Unavailable>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineAvailability {
    Available(Variant),
    /// Bed base enabled but no kind chosen yet.
    NotSelected,
    /// The chosen kind was cleared by a size change.
    UnavailableForSize(BedBaseKind),
    Unavailable(Unavailable),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddOnQuote {
    pub add_on_type: AddOnType,
    pub quantity: u32,
    pub availability: LineAvailability,
}

impl AddOnQuote {
    pub fn line_total(&self) -> f64 {
        match &self.availability {
            LineAvailability::Available(variant) => variant.price * self.quantity as f64,
            _ => 0.0,
        }
    }
}

/// Prices for the enabled add-ons. Disabled add-ons are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleQuote {
    pub pillow: Option<AddOnQuote>,
    pub bed_base: Option<AddOnQuote>,
    pub total: f64,
}

/// Session-scoped shopper choice.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleSelection {
    mattress_size: Option<Size>,
    pillow: PillowChoice,
    bed_base: BedBaseChoice,
    bounds: QuantityBounds,
}

impl Default for BundleSelection {
    fn default() -> Self {
        Self::new(QuantityBounds::default())
    }
}

impl BundleSelection {
    pub fn new(bounds: QuantityBounds) -> Self {
        Self {
            mattress_size: None,
            pillow: PillowChoice::reset(bounds),
            bed_base: BedBaseChoice::default(),
            bounds,
        }
    }

    pub fn mattress_size(&self) -> Option<Size> {
        self.mattress_size
    }

    pub fn pillow(&self) -> &PillowChoice {
        &self.pillow
    }

    pub fn bed_base(&self) -> &BedBaseChoice {
        &self.bed_base
    }

    pub fn bounds(&self) -> QuantityBounds {
        self.bounds
    }

    pub fn has_add_ons(&self) -> bool {
        self.pillow.enabled || self.bed_base.enabled
    }

    /// Normalizes `raw` and re-derives everything that depends on the size.
    ///
    /// Unrecognized text clears the size rather than guessing one.
    pub fn set_mattress_size(&mut self, raw: &str, table: &VariantTable) -> Option<Size> {
        let size = Size::parse(raw);
        debug!(raw, size = ?size, "Mattress size");
        self.mattress_size = size;

        if self.pillow.enabled {
            if let Some(size) = size {
                self.pillow.size = table.pillow_size_for(size);
            }
        }
        self.recheck_bed_base(table);
        size
    }

    /// Clears a kind the new size cannot supply, or brings a stale kind back once it can.
    fn recheck_bed_base(&mut self, table: &VariantTable) {
        let Some(size) = self.mattress_size else {
            return;
        };
        if let Some(kind) = self.bed_base.kind {
            if table.resolve_variant(AddOn::BedBase(kind), Some(size)).is_err() {
                debug!(%kind, %size, "Bed base kind no longer available");
                self.bed_base.kind = None;
                self.bed_base.stale_kind = Some(kind);
            }
        } else if let Some(kind) = self.bed_base.stale_kind {
            if table.resolve_variant(AddOn::BedBase(kind), Some(size)).is_ok() {
                self.bed_base.kind = Some(kind);
                self.bed_base.stale_kind = None;
            }
        }
    }

    pub fn resolve_variant(&self, add_on: AddOn, table: &VariantTable) -> Result<ResolvedVariant, Unavailable> {
        table.resolve_variant(add_on, self.mattress_size)
    }

    pub fn set_pillow_enabled(&mut self, enabled: bool, table: &VariantTable) {
        if enabled {
            self.pillow.enabled = true;
            if let Some(size) = self.mattress_size {
                self.pillow.size = table.pillow_size_for(size);
            }
        } else {
            self.pillow = PillowChoice::reset(self.bounds);
        }
    }

    pub fn set_pillow_size(&mut self, raw: &str) -> Result<PillowSize, SelectionError> {
        let size = PillowSize::parse(raw).ok_or_else(|| SelectionError::UnknownPillowSize(raw.to_string()))?;
        self.pillow.size = size;
        Ok(size)
    }

    /// Sets the pillow quantity from free text, clamped to the bounds.
    ///
    /// Text that is not an integer leaves the previous quantity in place.
    pub fn update_pillow_quantity(&mut self, raw: &str) -> u32 {
        if let Ok(requested) = raw.trim().parse::<i64>() {
            self.pillow.quantity = self.bounds.clamp(requested);
        }
        self.pillow.quantity
    }

    /// Stepper buttons: adds `delta`, stopping at the bounds.
    pub fn step_pillow_quantity(&mut self, delta: i32) -> u32 {
        self.pillow.quantity = self.bounds.clamp(self.pillow.quantity as i64 + delta as i64);
        self.pillow.quantity
    }

    pub fn set_bed_base_enabled(&mut self, enabled: bool, table: &VariantTable) {
        if enabled {
            self.bed_base.enabled = true;
            self.recheck_bed_base(table);
        } else {
            self.bed_base = BedBaseChoice::default();
        }
    }

    /// Picks a bed-base kind. The bed base must be enabled, and with a known size the
    /// kind must resolve.
    pub fn set_bed_base_kind(&mut self, raw: &str, table: &VariantTable) -> Result<BedBaseKind, SelectionError> {
        if !self.bed_base.enabled {
            return Err(SelectionError::BedBaseDisabled);
        }
        let kind = BedBaseKind::parse(raw).ok_or_else(|| SelectionError::UnknownBedBaseKind(raw.to_string()))?;
        if self.mattress_size.is_some() {
            self.resolve_variant(AddOn::BedBase(kind), table)
                .map_err(|reason| SelectionError::KindUnavailable { kind, reason })?;
        }
        self.bed_base.kind = Some(kind);
        self.bed_base.stale_kind = None;
        Ok(kind)
    }

    pub fn bed_base_options(&self, table: &VariantTable) -> Vec<BedBaseOption> {
        BedBaseKind::ALL
            .into_iter()
            .map(|kind| {
                let resolved = self.resolve_variant(AddOn::BedBase(kind), table);
                BedBaseOption {
                    kind,
                    selected: self.bed_base.kind == Some(kind),
                    selectable: resolved.is_ok(),
                    price: resolved.as_ref().ok().map(|r| r.variant.price),
                    unavailable: resolved.err(),
                }
            })
            .collect()
    }

    /// Prices the enabled add-ons: pillow price times quantity plus the bed base.
    pub fn quote(&self, table: &VariantTable) -> BundleQuote {
        let pillow = self.pillow.enabled.then(|| AddOnQuote {
            add_on_type: AddOnType::Pillow,
            quantity: self.pillow.quantity,
            availability: match self.resolve_variant(AddOn::Pillow(self.pillow.size), table) {
                Ok(resolved) => LineAvailability::Available(resolved.variant),
                Err(reason) => LineAvailability::Unavailable(reason),
            },
        });

        let bed_base = self.bed_base.enabled.then(|| AddOnQuote {
            add_on_type: AddOnType::BedBase,
            quantity: 1,
            availability: match (self.bed_base.kind, self.bed_base.stale_kind) {
                (Some(kind), _) => match self.resolve_variant(AddOn::BedBase(kind), table) {
                    Ok(resolved) => LineAvailability::Available(resolved.variant),
                    Err(reason) => LineAvailability::Unavailable(reason),
                },
                (None, Some(stale)) => LineAvailability::UnavailableForSize(stale),
                (None, None) => LineAvailability::NotSelected,
            },
        });

        let total = pillow.iter().chain(bed_base.iter()).map(AddOnQuote::line_total).sum();
        BundleQuote { pillow, bed_base, total }
    }
}
