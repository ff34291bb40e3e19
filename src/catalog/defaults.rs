//! The storefront's built-in variant table.
//!
//! Split King and California King have no dedicated bed-base SKUs; they are sold the
//! King base through fallback rules.

use super::table::{FallbackRule, VariantTable};
use crate::model::{BedBaseKind, PillowSize, Size, Variant};

pub const PILLOW_PRICE: f64 = 89.99;
pub const POWER_BASE_PRICE: f64 = 899.0;
pub const PLATFORM_PRICE: f64 = 399.0;
pub const RISER_PRICE: f64 = 199.0;

const POWER_BASES: [(Size, u64); 3] = [
    (Size::TwinXl, 43518441160880),
    (Size::Queen, 43518441193648),
    (Size::King, 43518441226416),
];

const PLATFORMS: [(Size, u64); 3] = [
    (Size::Full, 43557194268848),
    (Size::Queen, 43454855905456),
    (Size::King, 43454855938224),
];

const RISERS: [(Size, u64); 5] = [
    (Size::Twin, 43932973072560),
    (Size::TwinXl, 43932973007024),
    (Size::Full, 43932973138096),
    (Size::Queen, 43932973039792),
    (Size::King, 43932973105328),
];

/// Unvalidated default table; callers run [`VariantTable::validated`] on it like any other.
pub fn default_table() -> VariantTable {
    let mut table = VariantTable::default()
        .with_pillow(PillowSize::Standard, Variant::new(43549412032688u64, PILLOW_PRICE))
        .with_pillow(PillowSize::King, Variant::new(43549412065456u64, PILLOW_PRICE));

    let kinds = [
        (BedBaseKind::PowerBase, POWER_BASE_PRICE, &POWER_BASES[..]),
        (BedBaseKind::Platform, PLATFORM_PRICE, &PLATFORMS[..]),
        (BedBaseKind::Riser, RISER_PRICE, &RISERS[..]),
    ];
    for (kind, price, entries) in kinds {
        for (size, id) in entries {
            table = table.with_bed_base(kind, *size, Variant::new(*id, price));
        }
    }

    table
        .with_fallback(FallbackRule::new(Size::SplitKing, Size::King))
        .with_fallback(FallbackRule::new(Size::CaliforniaKing, Size::King))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AddOn;

    #[test]
    fn test_default_table_is_valid() {
        assert!(default_table().validated().is_ok());
    }

    #[test]
    fn test_split_king_shares_king_sku() {
        let table = default_table();
        let add_on = AddOn::BedBase(BedBaseKind::Platform);
        let split = table.resolve_variant(add_on, Some(Size::SplitKing)).unwrap();
        let king = table.resolve_variant(add_on, Some(Size::King)).unwrap();
        assert_eq!(split.variant.id, king.variant.id);
    }

    #[test]
    fn test_power_base_not_offered_in_twin() {
        let table = default_table();
        assert!(table
            .resolve_variant(AddOn::BedBase(BedBaseKind::PowerBase), Some(Size::Twin))
            .is_err());
    }
}
