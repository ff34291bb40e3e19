//! # State Client
//!
//! Cloneable handle used to reach a [`StateActor`](crate::framework::StateActor).

use crate::framework::error::FrameworkError;
use crate::framework::message::StateRequest;
use crate::framework::state::ActorState;
use tokio::sync::{mpsc, oneshot};

/// Sends requests to a [`StateActor`](crate::framework::StateActor) and awaits the reply.
///
/// Holds only a channel sender, so clones are cheap. The actor stops once the last
/// clone is dropped.
pub struct StateClient<T: ActorState> {
    sender: mpsc::Sender<StateRequest<T>>,
}

impl<T: ActorState> Clone for StateClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorState> StateClient<T> {
    pub fn new(sender: mpsc::Sender<StateRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn perform_action(&self, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Action { action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn snapshot(&self) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
