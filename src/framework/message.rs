//! # Messages
//!
//! Requests sent from a [`StateClient`](crate::framework::StateClient) to its actor.

use crate::framework::error::FrameworkError;
use crate::framework::state::ActorState;
use tokio::sync::oneshot;

/// One-shot channel the actor answers on.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A request to the actor owning `T`.
///
/// - **Action**: mutate (or query) the state through [`ActorState::handle_action`].
/// - **Snapshot**: return a clone of the current state.
#[derive(Debug)]
pub enum StateRequest<T: ActorState> {
    Action {
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Snapshot {
        respond_to: Response<T>,
    },
}
