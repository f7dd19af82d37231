//! Error types for the sync core
//!
//! Load-path failures split in two: conditions that abort the whole load
//! ([`LoadError`]) and per-record conditions that are isolated into the
//! load report ([`DropReason`]). Submission failures carry enough
//! structure to classify into the user-facing status message.

use pref_ledger::LedgerError;
use pref_record::{CodecError, RecordId, SealError};

/// Failures that abort a repository load
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// Availability probe reported the service down
    #[error("ledger service unavailable")]
    ServiceUnavailable,

    /// Probe or index read could not reach the ledger
    #[error("ledger unreachable: {0}")]
    Transport(#[from] LedgerError),
}

/// Why a single record was dropped during load
///
/// Per-record conditions never escape the load; they aggregate in the
/// report for observability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DropReason {
    /// Indexed id has no stored payload
    #[error("payload absent")]
    Missing,

    /// Record fetch failed
    #[error("transport failure: {0}")]
    Transport(String),

    /// Record payload did not decode
    #[error("payload malformed: {0}")]
    Malformed(String),
}

/// A record dropped from a load, with its classified reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropped {
    /// Id the index listed
    pub id: RecordId,
    /// Why the record did not make it into the result
    pub reason: DropReason,
}

/// Submission failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Required field missing; no ledger interaction occurred
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// No active account in the session
    #[error("no active account connected")]
    NotConnected,

    /// Another submission is still pending
    #[error("a submission is already pending")]
    InFlight,

    /// Sealing the input failed
    #[error("sealing failed: {0}")]
    Seal(#[from] SealError),

    /// Encoding the record failed
    #[error("record encode failed: {0}")]
    Encode(#[from] CodecError),

    /// The account holder rejected the transaction
    #[error("transaction rejected by user")]
    Rejected,

    /// The record write failed before anything was persisted
    #[error("record write failed: {0}")]
    Write(String),

    /// The record committed but the index append failed
    ///
    /// The named inconsistency window of the two-step registration: the
    /// record exists in the ledger but no index entry reaches it.
    #[error("record {id} committed but not indexed: {source}")]
    Detached {
        /// Id of the persisted, unreachable record
        id: RecordId,
        /// The phase-two failure
        source: LedgerError,
    },
}

impl SubmitError {
    /// Classify a phase-one (record write) failure
    #[must_use]
    pub fn from_write_failure(error: LedgerError) -> Self {
        if error.is_rejection() {
            Self::Rejected
        } else {
            Self::Write(error.to_string())
        }
    }

    /// Check if the account holder declined the commit
    #[inline]
    #[must_use]
    pub fn is_user_rejection(&self) -> bool {
        match self {
            Self::Rejected => true,
            Self::Detached { source, .. } => source.is_rejection(),
            _ => false,
        }
    }

    /// Human-readable message for the transaction status display
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_user_rejection() {
            "Transaction rejected by user".to_string()
        } else {
            format!("Submission failed: {self}")
        }
    }
}

/// Wallet provider failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Provider granted access but returned no accounts
    #[error("provider returned no accounts")]
    NoAccounts,

    /// Provider could not be reached or refused the request
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}
