//! # Bundle & Save
//!
//! Add-on engine for a mattress product page: the mattress, an optional pillow and an
//! optional bed base, submitted to a cart store as one bundle.
//!
//! ## Architecture
//!
//! Mutable state is owned by single-task actors built on a small generic layer:
//!
//! ### 1. The Engine ([`framework`])
//! [`StateActor<T>`](framework::StateActor) owns one value and applies
//! [`ActorState::handle_action`](framework::ActorState::handle_action) to it in arrival
//! order. [`framework::mock`] lets tests stand in for any actor.
//!
//! ### 2. Selection State Tracker ([`model`], [`catalog`], [`selection`])
//! Free-text sizes normalize to [`Size`](model::Size). A validated, versioned
//! [`VariantTable`](catalog::VariantTable) resolves each add-on to exactly one purchasable
//! variant, following fallback rules only when a size has no entry and never handing out
//! a sold-out variant. [`BundleSelection`](selection::BundleSelection) holds the shopper's
//! choices and lives inside the selection actor.
//!
//! ### 3. Cart Submission Workflow ([`submission`])
//! [`BundleSubmitter`](submission::BundleSubmitter) validates a snapshot of the selection,
//! adds lines one at a time (Mattress, Pillow, Bed Base) through the
//! [`CartStore`](clients::CartStore) seam, keeps going past per-item failures, reads the
//! cart back and broadcasts one [`CartUpdated`](submission::CartUpdated). A second trigger
//! while one is running is refused.
//!
//! ### 4. Wiring ([`config`], [`lifecycle`], [`clients`])
//! [`BundleSystem`](lifecycle::BundleSystem) builds everything from a
//! [`BundleConfig`](config::BundleConfig) and shuts it down again.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run -- demos/bundle.toml
//! ```

pub mod cart;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod selection;
pub mod submission;
