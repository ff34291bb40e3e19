//! Add-on products and their sub-variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which add-on a line or a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddOnType {
    Pillow,
    BedBase,
}

impl AddOnType {
    pub fn label(&self) -> &'static str {
        match self {
            AddOnType::Pillow => "Pillow",
            AddOnType::BedBase => "Bed Base",
        }
    }
}

impl fmt::Display for AddOnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pillow sub-variant. Pillows come in two sizes regardless of the mattress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PillowSize {
    #[default]
    Standard,
    King,
}

impl PillowSize {
    /// Accepts `"standard"`, `"queen"` (sold as standard) or `"king"`, any case.
    pub fn parse(raw: &str) -> Option<PillowSize> {
        let lowered = raw.trim().to_lowercase();
        if lowered.contains("king") {
            Some(PillowSize::King)
        } else if lowered.contains("standard") || lowered.contains("queen") {
            Some(PillowSize::Standard)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PillowSize::Standard => "Standard",
            PillowSize::King => "King",
        }
    }
}

impl fmt::Display for PillowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bed-base sub-variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BedBaseKind {
    /// Adjustable power base.
    PowerBase,
    /// Wooden platform.
    Platform,
    /// HD riser.
    Riser,
}

impl BedBaseKind {
    pub const ALL: [BedBaseKind; 3] = [BedBaseKind::PowerBase, BedBaseKind::Platform, BedBaseKind::Riser];

    /// Accepts the radio values and labels used on the storefront
    /// (`"adjustable"`, `"Power Base"`, `"platform"`, `"Wooden Platform"`, `"riser"`, `"HD Riser"`).
    pub fn parse(raw: &str) -> Option<BedBaseKind> {
        let lowered = raw.trim().to_lowercase();
        if lowered.contains("adjustable") || lowered.contains("power") {
            Some(BedBaseKind::PowerBase)
        } else if lowered.contains("platform") || lowered.contains("wood") {
            Some(BedBaseKind::Platform)
        } else if lowered.contains("riser") {
            Some(BedBaseKind::Riser)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BedBaseKind::PowerBase => "Power Base",
            BedBaseKind::Platform => "Wooden Platform",
            BedBaseKind::Riser => "HD Riser",
        }
    }
}

impl fmt::Display for BedBaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully specified add-on: the type plus its sub-variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddOn {
    Pillow(PillowSize),
    BedBase(BedBaseKind),
}

impl AddOn {
    pub fn add_on_type(&self) -> AddOnType {
        match self {
            AddOn::Pillow(_) => AddOnType::Pillow,
            AddOn::BedBase(_) => AddOnType::BedBase,
        }
    }
}

impl fmt::Display for AddOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddOn::Pillow(size) => write!(f, "{} Pillow", size),
            AddOn::BedBase(kind) => write!(f, "{} Bed Base", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bed_base_kind_accepts_values_and_labels() {
        assert_eq!(BedBaseKind::parse("adjustable"), Some(BedBaseKind::PowerBase));
        assert_eq!(BedBaseKind::parse("Power Base"), Some(BedBaseKind::PowerBase));
        assert_eq!(BedBaseKind::parse("platform"), Some(BedBaseKind::Platform));
        assert_eq!(BedBaseKind::parse("Wooden Platform"), Some(BedBaseKind::Platform));
        assert_eq!(BedBaseKind::parse("HD Riser"), Some(BedBaseKind::Riser));
        assert_eq!(BedBaseKind::parse("box spring"), None);
    }

    #[test]
    fn test_pillow_size_parse() {
        assert_eq!(PillowSize::parse("standard"), Some(PillowSize::Standard));
        assert_eq!(PillowSize::parse("King"), Some(PillowSize::King));
        assert_eq!(PillowSize::parse("body"), None);
    }
}
