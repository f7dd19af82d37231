//! Wallet session lifecycle: connect, account-change tracking, owner
//! filtering at the display boundary.

use pref_core::{ProviderError, SessionContext};
use pref_test_utils::{make_record, StaticProvider};
use std::sync::Arc;
use std::time::Duration;

const ACCOUNT: &str = "0xAbCdEf0123";

async fn settle() {
    // Let the spawned account watcher drain its channel.
    tokio::time::sleep(Duration::from_millis(20)).await;
}

#[tokio::test]
async fn connect_adopts_first_account() {
    let provider = Arc::new(StaticProvider::new([ACCOUNT, "0xSecond"]));
    let mut session = SessionContext::new();

    let active = session.connect(provider).await.unwrap();
    assert_eq!(active, ACCOUNT);
    assert_eq!(session.active_account().await.as_deref(), Some(ACCOUNT));
}

#[tokio::test]
async fn connect_with_no_accounts_fails() {
    let provider = Arc::new(StaticProvider::new(Vec::<String>::new()));
    let mut session = SessionContext::new();

    let result = session.connect(provider).await;
    assert_eq!(result.unwrap_err(), ProviderError::NoAccounts);
    assert_eq!(session.active_account().await, None);
}

#[tokio::test]
async fn unavailable_provider_fails_connect() {
    let provider = Arc::new(StaticProvider::unavailable("request refused"));
    let mut session = SessionContext::new();

    let result = session.connect(provider).await;
    assert!(matches!(result, Err(ProviderError::Unavailable(_))));
}

#[tokio::test]
async fn account_change_updates_active_account() {
    let provider = Arc::new(StaticProvider::new([ACCOUNT]));
    let mut session = SessionContext::new();
    session.connect(Arc::clone(&provider)).await.unwrap();

    provider.emit_accounts(vec!["0xNewAccount".to_string()]).await;
    settle().await;
    assert_eq!(
        session.active_account().await.as_deref(),
        Some("0xNewAccount")
    );

    // Withdrawal of access arrives as an empty list.
    provider.emit_accounts(Vec::new()).await;
    settle().await;
    assert_eq!(session.active_account().await, None);
}

#[tokio::test]
async fn disconnect_clears_local_state_only() {
    let provider = Arc::new(StaticProvider::new([ACCOUNT]));
    let mut session = SessionContext::new();
    session.connect(Arc::clone(&provider)).await.unwrap();

    session.disconnect().await;
    assert_eq!(session.active_account().await, None);

    // Notifications after disconnect no longer move the session.
    provider.emit_accounts(vec!["0xGhost".to_string()]).await;
    settle().await;
    assert_eq!(session.active_account().await, None);
}

#[tokio::test]
async fn is_owner_ignores_letter_case() {
    let provider = Arc::new(StaticProvider::new([ACCOUNT]));
    let mut session = SessionContext::new();
    session.connect(provider).await.unwrap();

    assert!(session.is_owner("0xABCDEF0123").await);
    assert!(session.is_owner("0xabcdef0123").await);
    assert!(!session.is_owner("0xSomebodyElse").await);
}

#[tokio::test]
async fn is_owner_is_false_when_disconnected() {
    let session = SessionContext::new();
    assert!(!session.is_owner(ACCOUNT).await);
}

#[tokio::test]
async fn filter_owned_keeps_active_accounts_records() {
    let provider = Arc::new(StaticProvider::new([ACCOUNT]));
    let mut session = SessionContext::new();
    session.connect(provider).await.unwrap();

    let records = vec![
        make_record("mine-upper", 300, "0xABCDEF0123", "Dosage"),
        make_record("theirs", 200, "0xSomebodyElse", "Location"),
        make_record("mine-lower", 100, "0xabcdef0123", "Monitoring"),
    ];

    let owned = session.filter_owned(records).await;
    let ids: Vec<&str> = owned.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["mine-upper", "mine-lower"]);
}

#[tokio::test]
async fn filter_owned_is_empty_when_disconnected() {
    let session = SessionContext::new();
    let records = vec![make_record("any", 100, ACCOUNT, "Dosage")];
    assert!(session.filter_owned(records).await.is_empty());
}
