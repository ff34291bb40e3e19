//! # ActorState Trait
//!
//! The contract a piece of state must satisfy to be owned by a [`StateActor`](crate::framework::StateActor).
//!
//! Each actor in this crate owns exactly one value (the shopper's selection, the cart)
//! instead of a keyed collection. All mutation goes through [`ActorState::handle_action`],
//! and readers receive a cloned snapshot, so nothing outside the owning task ever holds
//! a reference to live state.

use async_trait::async_trait;
use std::fmt::Debug;

/// State that can be owned and driven by a [`StateActor`](crate::framework::StateActor).
///
/// # Context
/// `Context` is injected when the actor starts (`run(context)`), not when it is built.
/// The selection actor receives the shared variant table this way.
#[async_trait]
pub trait ActorState: Clone + Send + Sync + 'static {
    /// Enum of operations the state understands.
    type Action: Send + Sync + Debug;

    /// Result returned by a successful action.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every action.
    /// Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum for the whole state.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short name used in log lines.
    fn label() -> &'static str;

    /// Apply one action. Called sequentially; never concurrently with another action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
