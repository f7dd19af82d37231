//! Testing utilities for the preference-ledger workspace
//!
//! Shared test doubles and fixtures: an in-memory ledger with fault
//! injection, a scripted wallet provider, and record builders.

#![allow(missing_docs)]

use dashmap::DashMap;
use pref_core::{ProviderError, WalletProvider};
use pref_ledger::{record_key, Commit, LedgerClient, LedgerError, INDEX_KEY};
use pref_record::{encode, seal, PreferenceRecord, RecordId, SubmissionInput};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// In-memory ledger with per-key and global fault injection
///
/// Injected fault messages are classified through
/// [`LedgerError::from_provider_message`], so a message carrying the
/// provider rejection signature produces `LedgerError::Rejected` exactly
/// as a real backend would.
pub struct MemoryLedger {
    data: DashMap<String, Vec<u8>>,
    available: AtomicBool,
    commits: AtomicU64,
    read_faults: DashMap<String, String>,
    write_faults: DashMap<String, String>,
    global_write_fault: Mutex<Option<String>>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
            available: AtomicBool::new(true),
            commits: AtomicU64::new(0),
            read_faults: DashMap::new(),
            write_faults: DashMap::new(),
            global_write_fault: Mutex::new(None),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Seed a raw payload directly, bypassing fault injection
    pub fn put(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.data.insert(key.into(), value.into());
    }

    /// Inspect a stored payload
    #[must_use]
    pub fn stored(&self, key: &str) -> Option<Vec<u8>> {
        self.data.get(key).map(|entry| entry.value().clone())
    }

    /// Fail reads of `key` with a transport error
    pub fn fail_reads(&self, key: impl Into<String>, message: impl Into<String>) {
        self.read_faults.insert(key.into(), message.into());
    }

    /// Fail writes of `key`; the message is classified provider-style
    pub fn fail_writes(&self, key: impl Into<String>, message: impl Into<String>) {
        self.write_faults.insert(key.into(), message.into());
    }

    /// Fail every write; the message is classified provider-style
    pub fn fail_all_writes(&self, message: impl Into<String>) {
        *self.global_write_fault.lock().unwrap() = Some(message.into());
    }

    /// Number of successful writes so far
    #[must_use]
    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LedgerClient for MemoryLedger {
    async fn is_available(&self) -> Result<bool, LedgerError> {
        Ok(self.available.load(Ordering::SeqCst))
    }

    async fn get_data(&self, key: &str) -> Result<Vec<u8>, LedgerError> {
        if let Some(message) = self.read_faults.get(key) {
            return Err(LedgerError::Transport(message.value().clone()));
        }
        Ok(self
            .data
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn set_data(&self, key: &str, value: Vec<u8>) -> Result<Commit, LedgerError> {
        if let Some(message) = self.global_write_fault.lock().unwrap().clone() {
            return Err(LedgerError::from_provider_message(message));
        }
        if let Some(message) = self.write_faults.get(key) {
            return Err(LedgerError::from_provider_message(message.value().clone()));
        }
        self.data.insert(key.to_string(), value);
        let n = self.commits.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Commit::new(format!("commit-{n}")))
    }
}

/// Wallet provider double with scripted accounts and change notifications
pub struct StaticProvider {
    accounts: Mutex<Vec<String>>,
    subscribers: Mutex<Vec<mpsc::Sender<Vec<String>>>>,
    failure: Option<String>,
}

impl StaticProvider {
    #[must_use]
    pub fn new<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accounts: Mutex::new(accounts.into_iter().map(Into::into).collect()),
            subscribers: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// A provider whose account request always fails
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            subscribers: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    /// Push an account-change notification to every subscriber
    pub async fn emit_accounts(&self, accounts: Vec<String>) {
        let subscribers = self.subscribers.lock().unwrap().clone();
        for subscriber in subscribers {
            let _ = subscriber.send(accounts.clone()).await;
        }
    }
}

#[async_trait::async_trait]
impl WalletProvider for StaticProvider {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        if let Some(message) = &self.failure {
            return Err(ProviderError::Unavailable(message.clone()));
        }
        Ok(self.accounts.lock().unwrap().clone())
    }

    fn subscribe_accounts(&self) -> mpsc::Receiver<Vec<String>> {
        let (tx, rx) = mpsc::channel(8);
        self.subscribers.lock().unwrap().push(tx);
        rx
    }
}

/// Build a record with a sealed payload derived from its type
#[must_use]
pub fn make_record(
    id: &str,
    timestamp: i64,
    owner: &str,
    preference_type: &str,
) -> PreferenceRecord {
    let input = SubmissionInput::new(preference_type, "fixture details", "");
    PreferenceRecord::new(
        RecordId::from_string(id),
        seal(&input).unwrap(),
        timestamp,
        owner,
        preference_type,
    )
}

/// Seed records and an index listing them in the given order
pub fn seed_records(ledger: &MemoryLedger, records: &[PreferenceRecord]) {
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    seed_index(ledger, &ids);
    for record in records {
        ledger.put(record_key(record.id.as_str()), encode(record).unwrap());
    }
}

/// Seed an index over arbitrary ids without touching record entries
pub fn seed_index(ledger: &MemoryLedger, ids: &[&str]) {
    ledger.put(INDEX_KEY, serde_json::to_vec(ids).unwrap());
}
