//! What a submission did, line by line.

use crate::cart::CartError;
use crate::catalog::Unavailable;
use crate::model::{AddOnType, CartLineRequest, CartState, VariantId};
use std::fmt;

/// The main product line the bundle is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainLine {
    pub variant_id: VariantId,
    pub quantity: u32,
}

impl MainLine {
    pub fn new(variant_id: impl Into<VariantId>, quantity: u32) -> Self {
        Self {
            variant_id: variant_id.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineLabel {
    Mattress,
    Pillow,
    BedBase,
}

impl From<AddOnType> for LineLabel {
    fn from(add_on_type: AddOnType) -> Self {
        match add_on_type {
            AddOnType::Pillow => LineLabel::Pillow,
            AddOnType::BedBase => LineLabel::BedBase,
        }
    }
}

impl fmt::Display for LineLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineLabel::Mattress => "Mattress",
            LineLabel::Pillow => "Pillow",
            LineLabel::BedBase => "Bed Base",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedLine {
    pub label: LineLabel,
    pub line: CartLineRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    pub label: LineLabel,
    pub line: CartLineRequest,
    pub error: CartError,
}

/// An enabled add-on left out because it had no purchasable variant.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedAddOn {
    pub label: LineLabel,
    pub reason: Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BundleSummary {
    pub added: Vec<SubmittedLine>,
    pub failed: Vec<ItemFailure>,
    pub unresolved: Vec<UnresolvedAddOn>,
    /// Cart after reconciliation, or the last add response if the fetch failed.
    pub final_cart: Option<CartState>,
    pub consistent: bool,
}

impl BundleSummary {
    pub fn added_labels(&self) -> Vec<LineLabel> {
        self.added.iter().map(|line| line.label).collect()
    }

    pub fn failed_labels(&self) -> Vec<LineLabel> {
        self.failed.iter().map(|failure| failure.label).collect()
    }

    /// Everything requested made it into the cart.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.unresolved.is_empty()
    }
}

/// Broadcast once per submission that got past validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CartUpdated {
    pub cart: Option<CartState>,
    pub consistent: bool,
}

/// Where the workflow is. Published on a watch channel for busy indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowPhase {
    #[default]
    Idle,
    Validating,
    /// Index into the planned lines.
    Submitting(usize),
    Reconciling,
    Broadcasting,
}

impl WorkflowPhase {
    pub fn is_busy(&self) -> bool {
        *self != WorkflowPhase::Idle
    }
}
