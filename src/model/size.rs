//! Mattress sizes and their free-text normalization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical mattress size.
///
/// Used both as the mattress's own dimension and as a key into the bed-base variant
/// table. Serialized as its slug (`"twin-xl"`, `"split-king"`, ...); deserialization
/// accepts anything [`Size::parse`] understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Size {
    Twin,
    TwinXl,
    Full,
    Queen,
    King,
    SplitKing,
    CaliforniaKing,
}

/// Returned when free text names no known size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mattress size: {0:?}")]
pub struct UnknownSize(pub String);

impl Size {
    pub const ALL: [Size; 7] = [
        Size::Twin,
        Size::TwinXl,
        Size::Full,
        Size::Queen,
        Size::King,
        Size::SplitKing,
        Size::CaliforniaKing,
    ];

    /// Normalizes an option value or label to a canonical size.
    ///
    /// Matching is case-insensitive and keyword based, so storefront labels such as
    /// `"Split King (2 Twin XL)"`, `"split king - 2 txl"` or `"Cal King"` resolve to the
    /// same value as the bare name. More specific sizes are tested first: a Split King
    /// label mentions "twin xl" and every California King label mentions "king".
    ///
    /// Returns `None` when no keyword matches; callers must not substitute a default.
    pub fn parse(raw: &str) -> Option<Size> {
        let lowered = raw.to_lowercase();
        let normalized: String = lowered
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        let has = |word: &str| tokens.contains(&word);

        if lowered.contains("split") && lowered.contains("king") {
            return Some(Size::SplitKing);
        }
        if lowered.contains("california") || has("calking") || has("cali") || (has("cal") && has("king")) {
            return Some(Size::CaliforniaKing);
        }
        if has("twinxl") || has("txl") || (has("twin") && has("xl")) {
            return Some(Size::TwinXl);
        }
        if has("twin") {
            return Some(Size::Twin);
        }
        if has("full") || has("double") {
            return Some(Size::Full);
        }
        if has("queen") {
            return Some(Size::Queen);
        }
        if has("king") {
            return Some(Size::King);
        }
        None
    }

    /// Human-readable name as shown on the storefront.
    pub fn name(&self) -> &'static str {
        match self {
            Size::Twin => "Twin",
            Size::TwinXl => "Twin XL",
            Size::Full => "Full",
            Size::Queen => "Queen",
            Size::King => "King",
            Size::SplitKing => "Split King",
            Size::CaliforniaKing => "California King",
        }
    }

    /// Stable key used in configuration files.
    pub fn slug(&self) -> &'static str {
        match self {
            Size::Twin => "twin",
            Size::TwinXl => "twin-xl",
            Size::Full => "full",
            Size::Queen => "queen",
            Size::King => "king",
            Size::SplitKing => "split-king",
            Size::CaliforniaKing => "california-king",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Size {
    type Err = UnknownSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::parse(s).ok_or_else(|| UnknownSize(s.to_string()))
    }
}

impl TryFrom<String> for Size {
    type Error = UnknownSize;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Size> for String {
    fn from(size: Size) -> Self {
        size.slug().to_string()
    }
}
