//! Timed status transitions under a paused clock: auto-resets fire at
//! the configured delay and not before, and stale timers never clobber a
//! newer state.

use pref_core::{
    SessionContext, StatusMachine, SubmissionOrchestrator, SyncConfig, TransactionStatus,
};
use pref_ledger::LedgerClient;
use pref_record::SubmissionInput;
use pref_test_utils::{MemoryLedger, StaticProvider};
use std::sync::Arc;
use std::time::Duration;

fn setup() -> (Arc<MemoryLedger>, Arc<StatusMachine>, SubmissionOrchestrator) {
    let ledger = Arc::new(MemoryLedger::new());
    let status = Arc::new(StatusMachine::new(SyncConfig::default()));
    let orchestrator = SubmissionOrchestrator::new(
        Arc::clone(&ledger) as Arc<dyn LedgerClient>,
        Arc::clone(&status),
    );
    (ledger, status, orchestrator)
}

async fn connected_session() -> SessionContext {
    let mut session = SessionContext::new();
    session
        .connect(Arc::new(StaticProvider::new(["0xA11CE"])))
        .await
        .unwrap();
    session
}

async fn settle() {
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn rejection_resets_after_error_delay_and_not_before() {
    let (ledger, status, orchestrator) = setup();
    let session = connected_session().await;
    ledger.fail_all_writes("user rejected transaction");

    let input = SubmissionInput::new("Dosage", "low dose", "");
    let _ = orchestrator.submit(&session, input).await;

    assert_eq!(
        status.current().await,
        TransactionStatus::Error("Transaction rejected by user".to_string())
    );

    tokio::time::advance(Duration::from_millis(2999)).await;
    settle().await;
    assert!(matches!(status.current().await, TransactionStatus::Error(_)));

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(status.current().await, TransactionStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn success_resets_after_success_delay() {
    let (_ledger, status, orchestrator) = setup();
    let session = connected_session().await;

    let input = SubmissionInput::new("Dosage", "low dose", "");
    orchestrator.submit(&session, input).await.unwrap();

    assert!(matches!(
        status.current().await,
        TransactionStatus::Success(_)
    ));

    tokio::time::advance(Duration::from_millis(1999)).await;
    settle().await;
    assert!(matches!(
        status.current().await,
        TransactionStatus::Success(_)
    ));

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(status.current().await, TransactionStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn resubmission_during_reset_window_is_not_clobbered() {
    let (_ledger, status, orchestrator) = setup();
    let session = connected_session().await;

    let input = SubmissionInput::new("Dosage", "low dose", "");
    orchestrator.submit(&session, input.clone()).await.unwrap();

    // Halfway through the success reset window, start a new submission.
    tokio::time::advance(Duration::from_millis(1000)).await;
    orchestrator.submit(&session, input).await.unwrap();

    // The first reset's deadline passes; the second submission's outcome
    // must survive it.
    tokio::time::advance(Duration::from_millis(1500)).await;
    settle().await;
    assert!(matches!(
        status.current().await,
        TransactionStatus::Success(_)
    ));

    tokio::time::advance(Duration::from_millis(500)).await;
    settle().await;
    assert_eq!(status.current().await, TransactionStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn custom_delays_are_honored() {
    let config = SyncConfig::new()
        .with_success_reset(Duration::from_millis(50))
        .with_error_reset(Duration::from_millis(80));
    let status = StatusMachine::new(config);

    status.fail("boom").await;
    tokio::time::advance(Duration::from_millis(79)).await;
    settle().await;
    assert!(matches!(status.current().await, TransactionStatus::Error(_)));

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(status.current().await, TransactionStatus::Idle);
}
