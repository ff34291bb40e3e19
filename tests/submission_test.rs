use bundle_save::cart::{Cart, CartAction, CartActionResult, CartError};
use bundle_save::catalog::defaults::default_table;
use bundle_save::catalog::VariantTable;
use bundle_save::clients::{CartClient, SelectionClient};
use bundle_save::framework::mock::{create_mock_client, expect_action, MockClient};
use bundle_save::framework::FrameworkError;
use bundle_save::model::{CartState, VariantId};
use bundle_save::selection::{self, QuantityBounds};
use bundle_save::submission::{
    BundleSubmitter, LineLabel, MainLine, SubmitError, SubmitPolicy, ValidationError, WorkflowPhase,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast::error::TryRecvError;

const MATTRESS: u64 = 44348731326640;
const KING_PILLOW: u64 = 43549412065456;
const KING_POWER_BASE: u64 = 43518441226416;

fn table() -> Arc<VariantTable> {
    Arc::new(default_table().validated().unwrap())
}

/// King mattress with two King pillows and a power base.
async fn full_bundle(table: Arc<VariantTable>) -> SelectionClient {
    let (actor, client) = selection::new(QuantityBounds::default());
    tokio::spawn(actor.run(table));
    client.set_mattress_size("King").await.unwrap();
    client.set_pillow_enabled(true).await.unwrap();
    client.update_pillow_quantity("2").await.unwrap();
    client.set_bed_base_enabled(true).await.unwrap();
    client.set_bed_base_kind("Power Base").await.unwrap();
    client
}

fn cart(item_count: u32) -> CartActionResult {
    CartActionResult::Cart(CartState {
        item_count,
        items: vec![],
    })
}

/// Lines reach the store one at a time, Mattress then Pillow then Bed Base.
#[tokio::test]
async fn test_lines_are_submitted_in_order() {
    let table = table();
    let selection = full_bundle(table.clone()).await;
    let (cart_client, mut requests) = create_mock_client::<Cart>(8);
    let submitter = BundleSubmitter::new(selection, CartClient::new(cart_client), table, SubmitPolicy::immediate());

    let task = {
        let submitter = submitter.clone();
        tokio::spawn(async move { submitter.submit(MainLine::new(MATTRESS, 1)).await })
    };

    let mut seen = Vec::new();
    for count in 1..=3u32 {
        let (action, responder) = expect_action(&mut requests).await.expect("Expected AddItem");
        match action {
            CartAction::AddItem(line) => seen.push((line.variant_id, line.quantity)),
            other => panic!("Expected AddItem, got {:?}", other),
        }
        // Nothing else is in flight while this add is unanswered.
        assert!(requests.try_recv().is_err());
        responder.send(Ok(cart(count))).unwrap();
    }
    let (action, responder) = expect_action(&mut requests).await.expect("Expected Get");
    assert!(matches!(action, CartAction::Get));
    responder.send(Ok(cart(4))).unwrap();

    let summary = task.await.unwrap().unwrap();
    assert_eq!(
        seen,
        vec![
            (VariantId::from(MATTRESS), 1),
            (VariantId::from(KING_PILLOW), 2),
            (VariantId::from(KING_POWER_BASE), 1),
        ]
    );
    assert_eq!(
        summary.added_labels(),
        vec![LineLabel::Mattress, LineLabel::Pillow, LineLabel::BedBase]
    );
    assert!(summary.is_complete());
    assert!(summary.consistent);
}

#[tokio::test]
async fn test_partial_failure_broadcasts_once() {
    let table = table();
    let selection = full_bundle(table.clone()).await;
    let mut mock = MockClient::<Cart>::new();
    mock.expect_action().return_ok(cart(1));
    mock.expect_action()
        .return_err(FrameworkError::StateError(Box::new(CartError::Transport("503".to_string()))));
    mock.expect_action().return_ok(cart(2));
    mock.expect_action().return_ok(cart(2));

    let submitter = BundleSubmitter::new(selection, CartClient::new(mock.client()), table, SubmitPolicy::immediate());
    let mut events = submitter.subscribe();

    let summary = submitter.submit(MainLine::new(MATTRESS, 1)).await.unwrap();

    assert_eq!(summary.added_labels(), vec![LineLabel::Mattress, LineLabel::BedBase]);
    assert_eq!(summary.failed_labels(), vec![LineLabel::Pillow]);
    assert_eq!(summary.failed[0].error, CartError::Transport("503".to_string()));
    assert_eq!(summary.final_cart.as_ref().map(|c| c.item_count), Some(2));

    let event = events.try_recv().unwrap();
    assert_eq!(event.cart.map(|c| c.item_count), Some(2));
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    mock.verify();
}

#[tokio::test]
async fn test_every_add_failing_is_still_a_summary() {
    let table = table();
    let (actor, selection) = selection::new(QuantityBounds::default());
    tokio::spawn(actor.run(table.clone()));
    selection.set_pillow_enabled(true).await.unwrap();

    let mut mock = MockClient::<Cart>::new();
    mock.expect_action().return_err(FrameworkError::ActorClosed);
    mock.expect_action().return_err(FrameworkError::ActorDropped);
    mock.expect_action().return_ok(cart(0));

    let submitter = BundleSubmitter::new(selection, CartClient::new(mock.client()), table, SubmitPolicy::immediate());
    let mut events = submitter.subscribe();
    let summary = submitter.submit(MainLine::new(MATTRESS, 1)).await.unwrap();

    assert!(summary.added.is_empty());
    assert_eq!(summary.failed_labels(), vec![LineLabel::Mattress, LineLabel::Pillow]);
    assert!(summary.consistent);
    assert!(events.try_recv().is_ok());
    mock.verify();
}

#[tokio::test]
async fn test_empty_cart_read_is_refetched() {
    let table = table();
    let (actor, selection) = selection::new(QuantityBounds::default());
    tokio::spawn(actor.run(table.clone()));

    let mut mock = MockClient::<Cart>::new();
    mock.expect_action().return_ok(cart(1));
    mock.expect_action().return_ok(cart(0));
    mock.expect_action().return_ok(cart(1));

    let submitter = BundleSubmitter::new(selection, CartClient::new(mock.client()), table, SubmitPolicy::immediate());
    let summary = submitter.submit(MainLine::new(MATTRESS, 1)).await.unwrap();

    assert!(summary.consistent);
    assert_eq!(summary.final_cart.map(|c| c.item_count), Some(1));
    assert!(matches!(mock.received_actions()[1], CartAction::Get));
    assert!(matches!(mock.received_actions()[2], CartAction::Get));
    mock.verify();
}

#[tokio::test]
async fn test_refetch_budget_exhausted_is_inconsistent() {
    let table = table();
    let (actor, selection) = selection::new(QuantityBounds::default());
    tokio::spawn(actor.run(table.clone()));

    let mut mock = MockClient::<Cart>::new();
    mock.expect_action().return_ok(cart(1));
    mock.expect_action().return_ok(cart(0));
    mock.expect_action().return_ok(cart(0));

    let submitter = BundleSubmitter::new(selection, CartClient::new(mock.client()), table, SubmitPolicy::immediate());
    let mut events = submitter.subscribe();
    let summary = submitter.submit(MainLine::new(MATTRESS, 1)).await.unwrap();

    assert!(!summary.consistent);
    let event = events.try_recv().unwrap();
    assert!(!event.consistent);
    mock.verify();
}

#[tokio::test]
async fn test_failed_fetch_falls_back_to_last_add_response() {
    let table = table();
    let (actor, selection) = selection::new(QuantityBounds::default());
    tokio::spawn(actor.run(table.clone()));

    let mut mock = MockClient::<Cart>::new();
    mock.expect_action().return_ok(cart(1));
    mock.expect_action().return_err(FrameworkError::ActorClosed);

    let submitter = BundleSubmitter::new(selection, CartClient::new(mock.client()), table, SubmitPolicy::immediate());
    let summary = submitter.submit(MainLine::new(MATTRESS, 1)).await.unwrap();

    assert_eq!(summary.final_cart.map(|c| c.item_count), Some(1));
    assert!(summary.consistent);
    mock.verify();
}

#[tokio::test]
async fn test_second_trigger_while_submitting_is_refused() {
    let table = table();
    let selection = full_bundle(table.clone()).await;
    let (cart_client, mut requests) = create_mock_client::<Cart>(8);
    let submitter = BundleSubmitter::new(selection, CartClient::new(cart_client), table, SubmitPolicy::immediate());
    let mut phases = submitter.watch_phase();

    let task = {
        let submitter = submitter.clone();
        tokio::spawn(async move { submitter.submit(MainLine::new(MATTRESS, 1)).await })
    };

    // First add is held open, so the workflow is mid-submission.
    let (_, first) = expect_action(&mut requests).await.unwrap();
    assert_eq!(submitter.phase(), WorkflowPhase::Submitting(0));

    assert_eq!(submitter.submit(MainLine::new(MATTRESS, 1)).await, Err(SubmitError::Busy));
    assert_eq!(submitter.submit_add_ons().await, Err(SubmitError::Busy));
    assert!(requests.try_recv().is_err());

    first.send(Ok(cart(1))).unwrap();
    for count in 2..=3u32 {
        let (_, responder) = expect_action(&mut requests).await.unwrap();
        responder.send(Ok(cart(count))).unwrap();
    }
    let (_, responder) = expect_action(&mut requests).await.unwrap();
    responder.send(Ok(cart(4))).unwrap();

    let summary = task.await.unwrap().unwrap();
    assert_eq!(summary.added.len(), 3);
    assert_eq!(*phases.borrow_and_update(), WorkflowPhase::Idle);
    assert!(!submitter.phase().is_busy());
}

/// Changes made while lines are in flight do not reach the cart.
#[tokio::test]
async fn test_selection_is_snapshotted_at_validation() {
    let table = table();
    let selection = full_bundle(table.clone()).await;
    let (cart_client, mut requests) = create_mock_client::<Cart>(8);
    let submitter = BundleSubmitter::new(
        selection.clone(),
        CartClient::new(cart_client),
        table,
        SubmitPolicy::immediate(),
    );

    let task = {
        let submitter = submitter.clone();
        tokio::spawn(async move { submitter.submit(MainLine::new(MATTRESS, 1)).await })
    };

    let (_, first) = expect_action(&mut requests).await.unwrap();
    assert_eq!(selection.update_pillow_quantity("7").await.unwrap(), 7);
    selection.set_pillow_enabled(false).await.unwrap();
    first.send(Ok(cart(1))).unwrap();

    let (action, responder) = expect_action(&mut requests).await.unwrap();
    match action {
        CartAction::AddItem(line) => {
            assert_eq!(line.variant_id, VariantId::from(KING_PILLOW));
            assert_eq!(line.quantity, 2);
        }
        other => panic!("Expected pillow AddItem, got {:?}", other),
    }
    responder.send(Ok(cart(3))).unwrap();

    let (_, responder) = expect_action(&mut requests).await.unwrap();
    responder.send(Ok(cart(4))).unwrap();
    let (_, responder) = expect_action(&mut requests).await.unwrap();
    responder.send(Ok(cart(4))).unwrap();

    let summary = task.await.unwrap().unwrap();
    assert_eq!(
        summary.added_labels(),
        vec![LineLabel::Mattress, LineLabel::Pillow, LineLabel::BedBase]
    );
}

#[tokio::test]
async fn test_invalid_selection_makes_no_calls() {
    let table = table();
    let (actor, selection) = selection::new(QuantityBounds::default());
    tokio::spawn(actor.run(table.clone()));
    selection.set_bed_base_enabled(true).await.unwrap();

    let mock = MockClient::<Cart>::new();
    let submitter = BundleSubmitter::new(selection, CartClient::new(mock.client()), table, SubmitPolicy::immediate());
    let mut events = submitter.subscribe();

    let result = submitter.submit(MainLine::new(MATTRESS, 1)).await;
    assert_eq!(result, Err(SubmitError::Invalid(ValidationError::MissingBedBaseKind)));

    let result = submitter.submit(MainLine::new(MATTRESS, 0)).await;
    assert_eq!(result, Err(SubmitError::Invalid(ValidationError::InvalidMainQuantity(0))));

    assert!(mock.received_actions().is_empty());
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(submitter.phase(), WorkflowPhase::Idle);
    mock.verify();
}

#[tokio::test]
async fn test_settle_delay_separates_adds() {
    let table = table();
    let selection = full_bundle(table.clone()).await;
    let mut mock = MockClient::<Cart>::new();
    for count in 1..=4u32 {
        mock.expect_action().return_ok(cart(count));
    }

    let policy = SubmitPolicy {
        settle_delay: Duration::from_millis(20),
        ..SubmitPolicy::immediate()
    };
    let submitter = BundleSubmitter::new(selection, CartClient::new(mock.client()), table, policy);

    let started = Instant::now();
    submitter.submit(MainLine::new(MATTRESS, 1)).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(40));
    mock.verify();
}
