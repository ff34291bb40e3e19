//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber::fmt` subscriber. Levels come
//! from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run     # milestones: lines added, submission finished
//! RUST_LOG=debug cargo run    # adds payloads, phases and every actor message
//! ```
//!
//! Per-item cart failures and an inconsistent cart read are logged at `warn`.
//!
//! With `RUST_LOG=info` a bundle submission reads:
//!
//! ```text
//! INFO Actor started state_type="BundleSelection"
//! INFO Actor started state_type="Cart"
//! INFO submit:add_item: Added to cart label=Mattress variant_id=44348731326640 quantity=1
//! WARN submit:add_item: Failed to add to cart label=Pillow variant_id=43549412065456 error=...
//! INFO submit:add_item: Added to cart label=Bed Base variant_id=43518441226416 quantity=1
//! INFO submit: Submission finished added=2 failed=1 unresolved=0 consistent=true
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // state_type and label identify the source
        .compact()
        .init();
}
