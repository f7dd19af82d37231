//! Ledger client capability trait
//!
//! The narrow surface every ledger backend must satisfy: probe, read,
//! write. Reads treat absence as an empty payload so callers never branch
//! on a "not found" error; writes return a [`Commit`] acknowledgement or a
//! classified [`LedgerError`].

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};

/// Acknowledgement returned by a successful ledger write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    reference: String,
}

impl Commit {
    /// Create a commit acknowledgement with an opaque reference
    #[inline]
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    /// Opaque reference to the committed write
    #[inline]
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

/// Async capability interface over the remote key-value ledger
///
/// Implementations wrap whatever transport actually reaches the ledger.
/// No method provides multi-key atomicity: callers sequencing several
/// writes get exactly the consistency the ledger gives them, which is
/// none.
#[async_trait::async_trait]
pub trait LedgerClient: Send + Sync {
    /// Probe service availability
    ///
    /// # Errors
    /// `LedgerError::Transport` when the probe itself cannot reach the
    /// service.
    async fn is_available(&self) -> Result<bool, LedgerError>;

    /// Read the payload stored under `key`
    ///
    /// An absent key yields an empty payload, never an error.
    ///
    /// # Errors
    /// `LedgerError::Transport` when the remote call fails.
    async fn get_data(&self, key: &str) -> Result<Vec<u8>, LedgerError>;

    /// Write `value` under `key`
    ///
    /// # Errors
    /// - `LedgerError::Transport` when the remote call fails
    /// - `LedgerError::Rejected` when the account holder declines the
    ///   commit
    async fn set_data(&self, key: &str, value: Vec<u8>) -> Result<Commit, LedgerError>;
}
