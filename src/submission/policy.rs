//! Timing policies for the submission workflow.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backoff strategy between cart refetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum BackoffStrategy {
    None,
    Fixed {
        #[serde(with = "millis")]
        delay: Duration,
    },
    Exponential {
        #[serde(with = "millis")]
        base: Duration,
        #[serde(with = "millis")]
        max: Duration,
    },
}

impl BackoffStrategy {
    /// Delay before refetch number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed { delay } => *delay,
            Self::Exponential { base, max } => {
                let multiplier = 2u32.saturating_pow(attempt);
                std::cmp::min(base.saturating_mul(multiplier), *max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Fixed {
            delay: Duration::from_millis(400),
        }
    }
}

/// How hard to try for a cart read that reflects the adds just made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilePolicy {
    /// Extra fetches allowed after the first one reports an empty cart.
    pub max_refetches: u32,
    pub backoff: BackoffStrategy,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            max_refetches: 1,
            backoff: BackoffStrategy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitPolicy {
    /// Pause between consecutive cart insertions.
    #[serde(with = "millis", rename = "settle_delay_ms")]
    pub settle_delay: Duration,
    pub reconcile: ReconcilePolicy,
}

impl Default for SubmitPolicy {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(300),
            reconcile: ReconcilePolicy::default(),
        }
    }
}

impl SubmitPolicy {
    /// No waiting anywhere; same refetch budget as the default.
    pub fn immediate() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            reconcile: ReconcilePolicy {
                max_refetches: 1,
                backoff: BackoffStrategy::None,
            },
        }
    }

    pub fn with_max_refetches(mut self, max_refetches: u32) -> Self {
        self.reconcile.max_refetches = max_refetches;
        self
    }
}

/// Durations as whole milliseconds in config files.
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
