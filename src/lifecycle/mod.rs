//! Startup, wiring and shutdown of the bundle actors.
//!
//! - [`BundleSystem`] - builds the catalog from config, spawns the selection and cart
//!   actors and owns the [`BundleSubmitter`](crate::submission::BundleSubmitter)
//! - [`setup_tracing`] - installs the log subscriber

pub mod bundle_system;
pub mod tracing;

pub use bundle_system::*;
pub use tracing::*;
