use crate::framework::{ActorState, FrameworkError, StateClient};
use async_trait::async_trait;

/// Shared plumbing for the per-state clients.
///
/// Implementors only say how to reach the inner [`StateClient`] and which error enum
/// they speak; snapshotting and error recovery come for free.
#[async_trait]
pub trait ActorClient<T: ActorState>: Send + Sync {
    /// The state-specific error type.
    type Error: std::error::Error + From<String> + Send + Sync + 'static;

    fn inner(&self) -> &StateClient<T>;

    /// Recovers the typed error an action failed with, or wraps a channel failure.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::StateError(inner) => match inner.downcast::<Self::Error>() {
                Ok(typed) => *typed,
                Err(other) => Self::Error::from(other.to_string()),
            },
            other => Self::Error::from(other.to_string()),
        }
    }

    /// Clone of the current state.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    async fn act(&self, action: T::Action) -> Result<T::ActionResult, Self::Error> {
        self.inner().perform_action(action).await.map_err(Self::map_error)
    }
}
