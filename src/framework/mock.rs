//! # Mock Framework
//!
//! Utilities for testing code that holds a [`StateClient`] without spawning the real actor.
//!
//! Two styles are available:
//!
//! - [`MockClient`]: queue expectations up front (`expect_action().return_ok(..)`), hand
//!   out the client, then call [`MockClient::verify`]. Good for scripted happy/failure paths.
//! - [`create_mock_client`] + [`expect_action`] / [`expect_snapshot`]: receive every
//!   request yourself, in arrival order, and answer it by hand. Good for asserting call
//!   order or holding a request open while something else happens.
//!
//! ```rust
//! use bundle_save::cart::{Cart, CartAction, CartActionResult};
//! use bundle_save::framework::mock::MockClient;
//! use bundle_save::model::CartState;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Cart>::new();
//!     mock.expect_action().return_ok(CartActionResult::Cart(CartState::default()));
//!
//!     let client = mock.client();
//!     let result = client.perform_action(CartAction::Clear).await.unwrap();
//!     assert!(matches!(result, CartActionResult::Cart(_)));
//!
//!     mock.verify();
//! }
//! ```

use crate::framework::client::StateClient;
use crate::framework::error::FrameworkError;
use crate::framework::message::{Response, StateRequest};
use crate::framework::state::ActorState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A queued reply for the next request the mock receives.
enum Expectation<T: ActorState> {
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
    Snapshot {
        response: Result<T, FrameworkError>,
    },
}

/// A mock actor that answers requests from a queue of expectations.
///
/// Requests are matched strictly in order. A request that does not match the next
/// expectation (or arrives when the queue is empty) panics the mock task, which makes
/// the waiting client see [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorState> {
    client: StateClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    received: Arc<Mutex<Vec<T::Action>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorState> Default for MockClient<T>
where
    T::Action: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorState> MockClient<T>
where
    T::Action: Clone,
{
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StateRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let received = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let received_clone = received.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StateRequest::Action { action, respond_to },
                        Some(Expectation::Action { response }),
                    ) => {
                        received_clone.lock().unwrap().push(action);
                        let _ = respond_to.send(response);
                    }
                    (
                        StateRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StateClient::new(sender),
            expectations,
            received,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StateClient<T> {
        self.client.clone()
    }

    /// Expects an `action` request.
    pub fn expect_action(&mut self) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `snapshot` request.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<T> {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Actions received so far, in arrival order.
    pub fn received_actions(&self) -> Vec<T::Action> {
        self.received.lock().unwrap().clone()
    }

    /// Panics if any expectation is still queued.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorState> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ActorState> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Action { response: Ok(result) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Action { response: Err(error) });
    }
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<T: ActorState> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ActorState> SnapshotExpectationBuilder<T> {
    pub fn return_ok(self, state: T) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot { response: Ok(state) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot { response: Err(error) });
    }
}

// =============================================================================
// MANUAL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Nothing answers the requests until the test pulls them with [`expect_action`] or
/// [`expect_snapshot`], so the caller stays suspended on its `.await` in the meantime.
pub fn create_mock_client<T: ActorState>(
    buffer_size: usize,
) -> (StateClient<T>, mpsc::Receiver<StateRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StateClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is an action.
pub async fn expect_action<T: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<T>>,
) -> Option<(T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(StateRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a snapshot.
pub async fn expect_snapshot<T: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<T>>,
) -> Option<Response<T>> {
    match receiver.recv().await {
        Some(StateRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Cart, CartAction, CartActionResult};
    use crate::model::{CartLineRequest, CartState, VariantId};

    #[tokio::test]
    async fn test_manual_mock_sees_action_payload() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);

        let task = tokio::spawn(async move {
            client
                .perform_action(CartAction::AddItem(CartLineRequest::new(VariantId::from(7u64), 2)))
                .await
        });

        let (action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        match action {
            CartAction::AddItem(line) => {
                assert_eq!(line.variant_id, VariantId::from(7u64));
                assert_eq!(line.quantity, 2);
            }
            other => panic!("Expected AddItem, got {:?}", other),
        }
        responder.send(Ok(CartActionResult::Cart(CartState::default()))).unwrap();

        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action().return_err(FrameworkError::ActorClosed);
        mock.expect_snapshot().return_ok(Cart::default());

        let client = mock.client();
        let err = client.perform_action(CartAction::Clear).await.unwrap_err();
        assert!(matches!(err, FrameworkError::ActorClosed));
        let cart = client.snapshot().await.unwrap();
        assert!(cart.is_empty());

        assert_eq!(mock.received_actions().len(), 1);
        mock.verify();
    }
}
