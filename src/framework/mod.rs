//! Single-owner actor plumbing.
//!
//! Every piece of mutable state in this crate (the shopper's selection, the in-process
//! cart store) is owned by one Tokio task and reached through a cloneable client.
//!
//! # Main Components
//!
//! - [`ActorState`] - Trait implemented by state an actor can own
//! - [`StateActor`] - The task-side event loop
//! - [`StateClient`] - Cloneable handle for sending actions and taking snapshots
//! - [`FrameworkError`] - Channel and state errors
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning the real actor.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;

pub use actor::StateActor;
pub use client::StateClient;
pub use error::FrameworkError;
pub use message::{Response, StateRequest};
pub use state::ActorState;
