//! The versioned variant table and its resolution rules.

use super::error::{CatalogError, Unavailable};
use crate::model::{AddOn, BedBaseKind, PillowSize, Size, Variant};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Table format understood by this build.
pub const TABLE_VERSION: u32 = 1;

/// Redirects bed-base lookups for `from` to `to` when `from` has no entry of its own.
///
/// `kind = None` applies the rule to every bed-base kind. Rules are consulted in table
/// order and may chain (`a -> b`, `b -> c`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackRule {
    #[serde(default)]
    pub kind: Option<BedBaseKind>,
    pub from: Size,
    pub to: Size,
}

impl FallbackRule {
    pub fn new(from: Size, to: Size) -> Self {
        Self { kind: None, from, to }
    }

    pub fn for_kind(kind: BedBaseKind, from: Size, to: Size) -> Self {
        Self {
            kind: Some(kind),
            from,
            to,
        }
    }

    fn applies(&self, kind: BedBaseKind, size: Size) -> bool {
        self.from == size && self.kind.map_or(true, |k| k == kind)
    }
}

/// Outcome of a successful [`VariantTable::resolve_variant`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariant {
    pub add_on: AddOn,
    pub variant: Variant,
    /// Size whose entry was used when a fallback rule redirected the lookup.
    pub via_fallback: Option<Size>,
}

/// Every variant the add-ons can resolve to, plus the rules that connect them.
///
/// Build with the `with_*` methods, then call [`VariantTable::validated`] once before
/// sharing it. The table is read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantTable {
    version: u32,
    pillows: HashMap<PillowSize, Variant>,
    bed_bases: HashMap<(BedBaseKind, Size), Variant>,
    fallbacks: Vec<FallbackRule>,
    pillow_sizes: HashMap<Size, PillowSize>,
}

impl Default for VariantTable {
    fn default() -> Self {
        Self::new(TABLE_VERSION)
    }
}

impl VariantTable {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            pillows: HashMap::new(),
            bed_bases: HashMap::new(),
            fallbacks: Vec::new(),
            pillow_sizes: HashMap::new(),
        }
    }

    pub fn with_pillow(mut self, size: PillowSize, variant: Variant) -> Self {
        self.pillows.insert(size, variant);
        self
    }

    pub fn with_bed_base(mut self, kind: BedBaseKind, size: Size, variant: Variant) -> Self {
        self.bed_bases.insert((kind, size), variant);
        self
    }

    pub fn with_fallback(mut self, rule: FallbackRule) -> Self {
        self.fallbacks.push(rule);
        self
    }

    pub fn with_pillow_size(mut self, mattress: Size, pillow: PillowSize) -> Self {
        self.pillow_sizes.insert(mattress, pillow);
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn fallbacks(&self) -> &[FallbackRule] {
        &self.fallbacks
    }

    /// Pillow size that goes with a mattress size.
    ///
    /// Explicit map entries win; otherwise King and California King take the King
    /// pillow and everything else the Standard one.
    pub fn pillow_size_for(&self, mattress: Size) -> PillowSize {
        if let Some(pillow) = self.pillow_sizes.get(&mattress) {
            return *pillow;
        }
        match mattress {
            Size::King | Size::CaliforniaKing => PillowSize::King,
            _ => PillowSize::Standard,
        }
    }

    /// Resolves an add-on to exactly one available variant.
    ///
    /// Pillows ignore the mattress size. Bed bases look up `(kind, size)`; only when
    /// that entry is absent are fallback rules followed. A sold-out entry, exact or
    /// reached through a fallback, ends the lookup with [`Unavailable::SoldOut`].
    pub fn resolve_variant(&self, add_on: AddOn, size: Option<Size>) -> Result<ResolvedVariant, Unavailable> {
        match add_on {
            AddOn::Pillow(pillow) => {
                let variant = self.pillows.get(&pillow).ok_or(Unavailable::NoVariant(add_on))?;
                Self::available(add_on, variant, None)
            }
            AddOn::BedBase(kind) => {
                let size = size.ok_or(Unavailable::UnknownSize(add_on))?;
                if let Some(variant) = self.bed_bases.get(&(kind, size)) {
                    return Self::available(add_on, variant, None);
                }

                let mut current = size;
                let mut visited = HashSet::from([size]);
                while let Some(rule) = self.fallbacks.iter().find(|r| r.applies(kind, current)) {
                    if !visited.insert(rule.to) {
                        break;
                    }
                    debug!(%kind, from = %current, to = %rule.to, "Following fallback rule");
                    if let Some(variant) = self.bed_bases.get(&(kind, rule.to)) {
                        return Self::available(add_on, variant, Some(rule.to));
                    }
                    current = rule.to;
                }
                Err(Unavailable::NoVariant(add_on))
            }
        }
    }

    fn available(add_on: AddOn, variant: &Variant, via_fallback: Option<Size>) -> Result<ResolvedVariant, Unavailable> {
        if !variant.is_available() {
            return Err(Unavailable::SoldOut {
                add_on,
                variant_id: variant.id.clone(),
            });
        }
        Ok(ResolvedVariant {
            add_on,
            variant: variant.clone(),
            via_fallback,
        })
    }

    /// Checks the table once at startup and hands it back if it is usable.
    pub fn validated(self) -> Result<Self, CatalogError> {
        if self.version != TABLE_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: self.version,
                expected: TABLE_VERSION,
            });
        }

        let pillows = self.pillows.iter().map(|(size, v)| (format!("{} pillow", size), v));
        let bases = self
            .bed_bases
            .iter()
            .map(|((kind, size), v)| (format!("{} {}", size, kind), v));
        for (what, variant) in pillows.chain(bases) {
            if variant.id.is_empty() {
                return Err(CatalogError::EmptyVariantId(what));
            }
            if !variant.price.is_finite() || variant.price < 0.0 {
                return Err(CatalogError::InvalidPrice {
                    what,
                    price: variant.price,
                });
            }
        }

        for rule in &self.fallbacks {
            let target_known = self
                .bed_bases
                .keys()
                .any(|(kind, size)| *size == rule.to && rule.kind.map_or(true, |k| k == *kind))
                || self.fallbacks.iter().any(|next| next.from == rule.to);
            if !target_known {
                return Err(CatalogError::FallbackTargetMissing {
                    from: rule.from,
                    to: rule.to,
                });
            }
        }

        for kind in BedBaseKind::ALL {
            for start in Size::ALL {
                let mut current = start;
                let mut visited = HashSet::from([start]);
                while let Some(rule) = self.fallbacks.iter().find(|r| r.applies(kind, current)) {
                    if !visited.insert(rule.to) {
                        return Err(CatalogError::FallbackCycle { kind, size: rule.to });
                    }
                    current = rule.to;
                }
            }
        }

        for (mattress, pillow) in &self.pillow_sizes {
            if !self.pillows.contains_key(pillow) {
                return Err(CatalogError::MissingPillowVariant {
                    mattress: *mattress,
                    pillow: *pillow,
                });
            }
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> VariantTable {
        VariantTable::default()
            .with_pillow(PillowSize::Standard, Variant::new(43549412032688u64, 89.99))
            .with_pillow(PillowSize::King, Variant::new(43549412065456u64, 89.99))
            .with_bed_base(BedBaseKind::PowerBase, Size::Queen, Variant::new(43518441193648u64, 899.0))
            .with_bed_base(BedBaseKind::PowerBase, Size::King, Variant::new(43518441226416u64, 899.0))
            .with_bed_base(BedBaseKind::Riser, Size::Queen, Variant::new(43932973039792u64, 199.0).with_inventory(0))
            .with_bed_base(BedBaseKind::Riser, Size::King, Variant::new(43932973105328u64, 199.0))
            .with_fallback(FallbackRule::new(Size::SplitKing, Size::King))
    }

    #[test]
    fn test_exact_match_wins() {
        let resolved = table()
            .resolve_variant(AddOn::BedBase(BedBaseKind::PowerBase), Some(Size::Queen))
            .unwrap();
        assert_eq!(resolved.variant.id.as_str(), "43518441193648");
        assert_eq!(resolved.via_fallback, None);
    }

    #[test]
    fn test_fallback_used_only_when_entry_absent() {
        let resolved = table()
            .resolve_variant(AddOn::BedBase(BedBaseKind::PowerBase), Some(Size::SplitKing))
            .unwrap();
        assert_eq!(resolved.variant.id.as_str(), "43518441226416");
        assert_eq!(resolved.via_fallback, Some(Size::King));
    }

    #[test]
    fn test_sold_out_exact_entry_is_not_substituted() {
        let table = table().with_fallback(FallbackRule::new(Size::Queen, Size::King));
        let err = table
            .resolve_variant(AddOn::BedBase(BedBaseKind::Riser), Some(Size::Queen))
            .unwrap_err();
        assert!(matches!(err, Unavailable::SoldOut { .. }));
    }

    #[test]
    fn test_sold_out_fallback_target_is_unavailable() {
        let table = table().with_fallback(FallbackRule::for_kind(BedBaseKind::Riser, Size::Full, Size::Queen));
        let err = table
            .resolve_variant(AddOn::BedBase(BedBaseKind::Riser), Some(Size::Full))
            .unwrap_err();
        assert!(matches!(err, Unavailable::SoldOut { .. }));
    }

    #[test]
    fn test_missing_size_and_missing_variant() {
        let table = table();
        let add_on = AddOn::BedBase(BedBaseKind::Platform);
        assert_eq!(table.resolve_variant(add_on, None), Err(Unavailable::UnknownSize(add_on)));
        assert_eq!(
            table.resolve_variant(add_on, Some(Size::Queen)),
            Err(Unavailable::NoVariant(add_on))
        );
    }

    #[test]
    fn test_pillow_ignores_mattress_size() {
        let table = table();
        let a = table.resolve_variant(AddOn::Pillow(PillowSize::King), None).unwrap();
        let b = table.resolve_variant(AddOn::Pillow(PillowSize::King), Some(Size::Twin)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let table = table();
        for size in Size::ALL {
            for kind in BedBaseKind::ALL {
                let add_on = AddOn::BedBase(kind);
                assert_eq!(
                    table.resolve_variant(add_on, Some(size)),
                    table.resolve_variant(add_on, Some(size))
                );
            }
        }
    }

    #[test]
    fn test_transitive_fallback() {
        let table = table()
            .with_fallback(FallbackRule::new(Size::CaliforniaKing, Size::SplitKing));
        let resolved = table
            .resolve_variant(AddOn::BedBase(BedBaseKind::PowerBase), Some(Size::CaliforniaKing))
            .unwrap();
        assert_eq!(resolved.via_fallback, Some(Size::King));
    }

    #[test]
    fn test_pillow_size_map_defaults() {
        let table = table().with_pillow_size(Size::SplitKing, PillowSize::King);
        assert_eq!(table.pillow_size_for(Size::King), PillowSize::King);
        assert_eq!(table.pillow_size_for(Size::CaliforniaKing), PillowSize::King);
        assert_eq!(table.pillow_size_for(Size::SplitKing), PillowSize::King);
        assert_eq!(table.pillow_size_for(Size::Queen), PillowSize::Standard);
    }

    #[test]
    fn test_validation_rejects_bad_tables() {
        assert!(matches!(
            VariantTable::new(2).validated(),
            Err(CatalogError::UnsupportedVersion { found: 2, .. })
        ));
        assert!(matches!(
            table().with_pillow(PillowSize::King, Variant::new("  ", 1.0)).validated(),
            Err(CatalogError::EmptyVariantId(_))
        ));
        assert!(matches!(
            table().with_fallback(FallbackRule::new(Size::Twin, Size::Full)).validated(),
            Err(CatalogError::FallbackTargetMissing { .. })
        ));
        assert!(matches!(
            table()
                .with_fallback(FallbackRule::new(Size::Full, Size::Twin))
                .with_fallback(FallbackRule::new(Size::Twin, Size::Full))
                .validated(),
            Err(CatalogError::FallbackCycle { .. })
        ));
        assert!(matches!(
            VariantTable::default()
                .with_pillow_size(Size::King, PillowSize::King)
                .validated(),
            Err(CatalogError::MissingPillowVariant { .. })
        ));
        assert!(table().validated().is_ok());
    }
}
