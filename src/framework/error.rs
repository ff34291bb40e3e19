//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, independent of the state an actor owns.

/// Errors that can occur while talking to a [`StateActor`](crate::framework::StateActor).
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("State error: {0}")]
    StateError(Box<dyn std::error::Error + Send + Sync>),
}
