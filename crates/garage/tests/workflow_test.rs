//! Setup submission workflow against the in-memory contract and SDK doubles

use rally_catalog::{Selection, find_car, find_part};
use rally_championship_trait::testing::{Call, Failure, InMemoryChampionship, Operation};
use rally_championship_trait::{Address, ChampionshipError, SetupParameters};
use rally_fhe::testing::{MockFailure, MockSdk};
use rally_fhe::{EncryptionGateway, FheError, NetworkBinding};
use rally_garage::{
    SetupWorkflow, ValidationError, WorkflowError, WorkflowEvent, WorkflowState,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn driver() -> Address {
    Address::repeat_byte(0xd1)
}

struct Harness {
    championship: Arc<InMemoryChampionship>,
    sdk: MockSdk,
    workflow: SetupWorkflow,
    events: mpsc::Receiver<WorkflowEvent>,
}

impl Harness {
    fn new(championship: InMemoryChampionship) -> Self {
        Self::with_sdk(championship, MockSdk::new())
    }

    fn with_sdk(championship: InMemoryChampionship, sdk: MockSdk) -> Self {
        let championship = Arc::new(championship);
        let gateway = Arc::new(EncryptionGateway::new(
            Arc::new(sdk.clone()),
            Some(NetworkBinding {
                rpc_url: "http://localhost:8545".to_string(),
                chain_id: 31337,
            }),
        ));
        let mut workflow = SetupWorkflow::new(championship.clone(), gateway);
        let events = workflow.subscribe();
        Self {
            championship,
            sdk,
            workflow,
            events,
        }
    }

    /// Events emitted so far
    fn drain(&mut self) -> Vec<WorkflowEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    fn states(events: &[WorkflowEvent]) -> Vec<WorkflowState> {
        events
            .iter()
            .filter_map(|event| match event {
                WorkflowEvent::StateChanged(state) => Some(*state),
                _ => None,
            })
            .collect()
    }
}

fn selection(part_ids: &[&str]) -> Selection {
    let mut selection = Selection::new(find_car("bmw-m3").unwrap());
    for id in part_ids {
        selection.add_part(find_part(id).unwrap());
    }
    selection
}

// =============================================================================
// HAPPY PATHS
// =============================================================================

#[tokio::test]
async fn unregistered_driver_is_registered_before_submitting() {
    let mut harness = Harness::new(InMemoryChampionship::new(Some(driver())));

    let outcome = harness
        .workflow
        .submit(&selection(&["turbo-v1"]))
        .await
        .unwrap();

    assert_eq!(
        outcome.parameters,
        SetupParameters {
            engine_tuning: 8,
            ..Default::default()
        }
    );
    assert_eq!(outcome.car_model, "BMW M3 Competition");
    assert_eq!(outcome.driver, driver());
    assert!(outcome.receipt.is_success());
    let registration_tx = outcome.registration_tx.expect("driver should have been registered");

    let calls = harness.championship.calls();
    assert_eq!(calls.len(), 5);
    assert_eq!(calls[0], Call::IsRegistered(driver()));
    assert_eq!(calls[1], Call::RegisterDriver);
    assert_eq!(
        calls[2],
        Call::AwaitConfirmation {
            tx_hash: registration_tx,
            confirmations: 2
        }
    );
    assert!(matches!(&calls[3], Call::SubmitCarSetup { car_model, .. } if car_model == "BMW M3 Competition"));
    assert_eq!(
        calls[4],
        Call::AwaitConfirmation {
            tx_hash: outcome.tx_hash(),
            confirmations: 2
        }
    );

    // Four 16-bit values then three 8-bit values
    assert_eq!(
        harness.sdk.last_inputs(),
        vec![(16, 8), (16, 0), (16, 0), (16, 0), (8, 0), (8, 0), (8, 0)]
    );
    assert_eq!(harness.sdk.last_scope(), Some((Address::repeat_byte(0x42), driver())));
    assert_eq!(harness.workflow.state(), WorkflowState::Succeeded);

    let events = harness.drain();
    assert_eq!(
        Harness::states(&events),
        vec![
            WorkflowState::CheckingRegistration,
            WorkflowState::RegisteringDriver,
            WorkflowState::AggregatingBoosts,
            WorkflowState::Encrypting,
            WorkflowState::Submitting,
            WorkflowState::AwaitingConfirmation,
            WorkflowState::Succeeded,
        ]
    );
    assert!(matches!(events.last(), Some(WorkflowEvent::Succeeded(_))));
}

#[tokio::test]
async fn registered_driver_skips_registration() {
    let mut harness = Harness::new(InMemoryChampionship::new(Some(driver())).with_registered(driver()));

    let outcome = harness
        .workflow
        .submit(&selection(&["turbo-v3", "trans-race", "wheels-magnesium"]))
        .await
        .unwrap();

    assert!(outcome.registration_tx.is_none());
    assert_eq!(harness.championship.count(Operation::RegisterDriver), 0);
    assert_eq!(harness.championship.count(Operation::SubmitCarSetup), 1);

    let states = Harness::states(&harness.drain());
    assert!(!states.contains(&WorkflowState::RegisteringDriver));
}

#[tokio::test]
async fn submitted_handles_match_encryption_output() {
    let mut harness = Harness::new(InMemoryChampionship::new(Some(driver())).with_registered(driver()));
    harness.workflow.submit(&selection(&["susp-race"])).await.unwrap();

    let submitted = harness
        .championship
        .calls()
        .into_iter()
        .find_map(|call| match call {
            Call::SubmitCarSetup { setup, .. } => Some(setup),
            _ => None,
        })
        .unwrap();

    assert!(!submitted.input_proof.is_empty());
    let handles = submitted.handles();
    for (i, a) in handles.iter().enumerate() {
        for b in &handles[i + 1..] {
            assert_ne!(a, b, "handles must be distinct");
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

#[tokio::test]
async fn empty_selection_fails_validation_without_side_effects() {
    let mut harness = Harness::new(InMemoryChampionship::new(Some(driver())));

    let err = harness.workflow.submit(&selection(&[])).await.unwrap_err();

    assert!(matches!(err, WorkflowError::Validation(ValidationError::NoPartsSelected)));
    assert!(harness.championship.calls().is_empty());
    assert!(harness.drain().is_empty());
    assert_eq!(harness.workflow.state(), WorkflowState::Idle);
    assert_eq!(harness.sdk.load_count(), 0);
}

#[tokio::test]
async fn missing_wallet_fails_validation_without_side_effects() {
    let mut harness = Harness::new(InMemoryChampionship::new(None));

    let err = harness
        .workflow
        .submit(&selection(&["turbo-v1"]))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::Validation(ValidationError::WalletNotConnected)));
    assert!(harness.championship.calls().is_empty());
    assert!(harness.drain().is_empty());
}

// =============================================================================
// FAILURES
// =============================================================================

#[tokio::test]
async fn wallet_rejection_of_setup_fails_without_tx_hash() {
    let championship = InMemoryChampionship::new(Some(driver())).with_registered(driver());
    championship.fail(Operation::SubmitCarSetup, Failure::WalletRejected);
    let mut harness = Harness::new(championship);

    let err = harness
        .workflow
        .submit(&selection(&["turbo-v1"]))
        .await
        .unwrap_err();

    assert!(err.is_wallet_rejection());
    assert_eq!(harness.workflow.state(), WorkflowState::Failed);
    assert_eq!(harness.championship.count(Operation::AwaitConfirmation), 0);

    let events = harness.drain();
    assert!(!events.iter().any(|e| matches!(e, WorkflowEvent::SetupSubmitted { .. })));
    assert!(matches!(
        events.last(),
        Some(WorkflowEvent::Failed { tx_hash: None, .. })
    ));
}

#[tokio::test]
async fn reverted_setup_receipt_is_a_revert_failure() {
    let championship = InMemoryChampionship::new(Some(driver())).with_registered(driver());
    championship.fail(Operation::SubmitCarSetup, Failure::RevertOnChain);
    let mut harness = Harness::new(championship);

    let err = harness
        .workflow
        .submit(&selection(&["turbo-v1"]))
        .await
        .unwrap_err();

    let WorkflowError::TransactionReverted { tx_hash } = err else {
        panic!("expected a revert, got {err:?}");
    };
    assert!(err.to_string().contains("reverted"));
    assert_eq!(harness.workflow.state(), WorkflowState::Failed);

    let events = harness.drain();
    assert!(events.contains(&WorkflowEvent::SetupSubmitted { tx_hash }));
    assert!(matches!(
        events.last(),
        Some(WorkflowEvent::Failed { tx_hash: Some(hash), .. }) if *hash == tx_hash
    ));
}

#[tokio::test]
async fn reverted_registration_aborts_submission() {
    let championship = InMemoryChampionship::new(Some(driver()));
    championship.fail(Operation::RegisterDriver, Failure::RevertOnChain);
    let mut harness = Harness::new(championship);

    let err = harness
        .workflow
        .submit(&selection(&["turbo-v1"]))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::RegistrationReverted { .. }));
    assert_eq!(harness.championship.count(Operation::SubmitCarSetup), 0);
    assert_eq!(harness.sdk.load_count(), 0);
}

#[tokio::test]
async fn registration_check_rpc_failure_is_not_retried() {
    let championship = InMemoryChampionship::new(Some(driver()));
    championship.fail(Operation::IsRegistered, Failure::Rpc);
    let mut harness = Harness::new(championship);

    let err = harness
        .workflow
        .submit(&selection(&["turbo-v1"]))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::Chain(ChampionshipError::Rpc(_))));
    assert_eq!(harness.championship.count(Operation::IsRegistered), 1);
    assert_eq!(harness.championship.count(Operation::RegisterDriver), 0);
}

#[tokio::test]
async fn confirmation_timeout_fails_submission() {
    let championship = InMemoryChampionship::new(Some(driver())).with_registered(driver());
    championship.fail(Operation::AwaitConfirmation, Failure::Timeout);
    let mut harness = Harness::new(championship);

    let err = harness
        .workflow
        .submit(&selection(&["turbo-v1"]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Chain(ChampionshipError::TransactionTimeout { .. })
    ));
    assert_eq!(harness.workflow.state(), WorkflowState::Failed);
}

#[tokio::test]
async fn encryption_failure_is_surfaced_verbatim() {
    let championship = InMemoryChampionship::new(Some(driver())).with_registered(driver());
    let mut harness = Harness::with_sdk(championship, MockSdk::new().fail(MockFailure::Encrypt));

    let err = harness
        .workflow
        .submit(&selection(&["turbo-v1"]))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::Encryption(FheError::Encryption(_))));
    assert_eq!(harness.championship.count(Operation::SubmitCarSetup), 0);
}

#[tokio::test]
async fn sdk_load_failure_allows_a_later_attempt() {
    let championship = InMemoryChampionship::new(Some(driver())).with_registered(driver());
    let mut harness = Harness::with_sdk(championship, MockSdk::new().fail_once(MockFailure::Load));

    let err = harness
        .workflow
        .submit(&selection(&["turbo-v1"]))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Encryption(FheError::SdkLoad(_))));

    harness
        .workflow
        .submit(&selection(&["turbo-v1"]))
        .await
        .unwrap();
    assert_eq!(harness.sdk.load_count(), 2);
}

// =============================================================================
// SUBSCRIBER AND STATE
// =============================================================================

#[tokio::test]
async fn unread_subscriber_does_not_block_submissions() {
    let mut harness = Harness::new(InMemoryChampionship::new(Some(driver())).with_registered(driver()));

    // Eleven events per submission; the receiver is never drained
    for attempt in 1..=10 {
        let outcome = tokio::time::timeout(
            Duration::from_secs(5),
            harness.workflow.submit(&selection(&["turbo-v1"])),
        )
        .await
        .unwrap_or_else(|_| panic!("submission {} stalled", attempt));
        assert!(outcome.is_ok());
    }

    assert_eq!(harness.championship.count(Operation::SubmitCarSetup), 10);
    assert_eq!(harness.workflow.state(), WorkflowState::Succeeded);
    assert!(!harness.drain().is_empty());
}

#[tokio::test]
async fn new_attempt_starts_from_idle_after_failure() {
    let championship = InMemoryChampionship::new(Some(driver())).with_registered(driver());
    championship.fail(Operation::IsRegistered, Failure::Rpc);
    let mut harness = Harness::new(championship);

    harness
        .workflow
        .submit(&selection(&["turbo-v1"]))
        .await
        .unwrap_err();
    assert_eq!(harness.workflow.state(), WorkflowState::Failed);
    harness.drain();

    let err = harness.workflow.submit(&selection(&[])).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(ValidationError::NoPartsSelected)));
    assert_eq!(harness.workflow.state(), WorkflowState::Idle);
    assert!(harness.drain().is_empty());
}
