//! # State Actor
//!
//! The server half of the actor pattern: one Tokio task owns one value and applies
//! requests to it in arrival order.

use crate::framework::client::StateClient;
use crate::framework::error::FrameworkError;
use crate::framework::message::StateRequest;
use crate::framework::state::ActorState;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns a single `T` and processes [`StateRequest`]s one at a time.
///
/// Because only this task touches `state`, no `Mutex` is needed. Two clients sending
/// actions at the same time are simply queued on the channel.
///
/// ```rust
/// use bundle_save::framework::StateActor;
/// use bundle_save::cart::Cart;
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StateActor::new(Cart::default(), 8);
///     tokio::spawn(actor.run(()));
///     let cart = client.snapshot().await.unwrap();
///     assert!(cart.is_empty());
/// }
/// ```
pub struct StateActor<T: ActorState> {
    receiver: mpsc::Receiver<StateRequest<T>>,
    state: T,
}

impl<T: ActorState> StateActor<T> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` bounds the request channel; senders wait when it is full.
    pub fn new(initial: T, buffer_size: usize) -> (Self, StateClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state: initial,
        };
        (actor, StateClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let state_type = T::label();
        info!(state_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StateRequest::Action { action, respond_to } => {
                    debug!(state_type, ?action, "Action");
                    let result = self
                        .state
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::StateError(Box::new(e)));
                    match &result {
                        Ok(_) => debug!(state_type, "Action ok"),
                        Err(e) => warn!(state_type, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StateRequest::Snapshot { respond_to } => {
                    debug!(state_type, "Snapshot");
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
            }
        }

        info!(state_type, "Shutdown");
    }
}
