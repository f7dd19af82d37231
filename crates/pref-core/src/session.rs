//! Wallet session
//!
//! The session is an explicit context value threaded into every operation
//! that needs the active account; nothing here is process-wide state.
//! Providers plug in through the narrow [`WalletProvider`] capability
//! trait rather than an arbitrary runtime shape.
//!
//! Disconnecting clears the local account and provider reference and
//! stops the account watcher. It does not revoke the external provider's
//! grant; the underlying protocol offers no revoke operation.

use crate::error::ProviderError;
use pref_record::PreferenceRecord;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;

/// Narrow capability interface a wallet provider must satisfy
#[async_trait::async_trait]
pub trait WalletProvider: Send + Sync {
    /// Request account access
    ///
    /// # Errors
    /// `ProviderError::Unavailable` when the provider cannot be reached
    /// or refuses the request.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Subscribe to account-change notifications
    ///
    /// Each notification carries the full account list; an empty list
    /// means access was withdrawn.
    fn subscribe_accounts(&self) -> mpsc::Receiver<Vec<String>>;
}

/// Session context holding the active account and provider
pub struct SessionContext {
    account: Arc<RwLock<Option<String>>>,
    provider: Option<Arc<dyn WalletProvider>>,
    watcher: Option<JoinHandle<()>>,
}

impl SessionContext {
    /// Create a disconnected session
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            account: Arc::new(RwLock::new(None)),
            provider: None,
            watcher: None,
        }
    }

    /// Connect through a provider
    ///
    /// Requests accounts, adopts the first as active, and spawns a
    /// watcher that applies every subsequent account-change notification,
    /// including the transition to "no account".
    ///
    /// # Errors
    /// - `ProviderError::Unavailable` from the account request
    /// - `ProviderError::NoAccounts` when access is granted but no
    ///   account comes back
    pub async fn connect(
        &mut self,
        provider: Arc<dyn WalletProvider>,
    ) -> Result<String, ProviderError> {
        let accounts = provider.request_accounts().await?;
        let active = accounts.first().cloned().ok_or(ProviderError::NoAccounts)?;

        *self.account.write().await = Some(active.clone());

        let mut changes = provider.subscribe_accounts();
        let slot = Arc::clone(&self.account);
        let watcher = tokio::spawn(async move {
            while let Some(accounts) = changes.recv().await {
                let next = accounts.first().cloned();
                tracing::debug!(account = ?next, "account change notification");
                *slot.write().await = next;
            }
        });

        if let Some(previous) = self.watcher.replace(watcher) {
            previous.abort();
        }
        self.provider = Some(provider);
        Ok(active)
    }

    /// Disconnect, clearing local state only
    pub async fn disconnect(&mut self) {
        self.provider = None;
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
        *self.account.write().await = None;
    }

    /// The active account, if connected
    pub async fn active_account(&self) -> Option<String> {
        self.account.read().await.clone()
    }

    /// Check whether `address` is the active account, ignoring case
    ///
    /// False when no account is active.
    pub async fn is_owner(&self, address: &str) -> bool {
        self.account
            .read()
            .await
            .as_deref()
            .is_some_and(|active| active.eq_ignore_ascii_case(address))
    }

    /// Keep only records owned by the active account
    ///
    /// Display-boundary filtering only; the ledger does not enforce
    /// ownership.
    pub async fn filter_owned(&self, records: Vec<PreferenceRecord>) -> Vec<PreferenceRecord> {
        let active = self.account.read().await.clone();
        let Some(active) = active else {
            return Vec::new();
        };
        records
            .into_iter()
            .filter(|record| record.owner.eq_ignore_ascii_case(&active))
            .collect()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SessionContext {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("connected", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}
