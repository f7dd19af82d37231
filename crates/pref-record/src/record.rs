//! Preference record model
//!
//! A record is created exactly once at submission time and never mutated
//! afterwards: the timestamp is fixed at creation, the owner is the
//! account that submitted, and nothing in this client transitions the
//! review status past its default.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Suffix length matching the original id scheme
const SUFFIX_LEN: usize = 7;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Client-generated record identifier
///
/// Format: `<unix-millis>-<7-char base36 suffix>`. Uniqueness is
/// probabilistic by convention only; no collision check is made against
/// the stored index, and a collision overwrites under the ledger's
/// last-write-wins semantics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh id from the current time and a random suffix
    #[must_use]
    pub fn generate() -> Self {
        Self::from_parts(chrono::Utc::now().timestamp_millis(), &random_suffix())
    }

    /// Build an id from an explicit timestamp and suffix
    #[inline]
    #[must_use]
    pub fn from_parts(unix_millis: i64, suffix: &str) -> Self {
        Self(format!("{unix_millis}-{suffix}"))
    }

    /// Wrap an id read back from the ledger index
    #[inline]
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// Review status of a record
///
/// Defaults to `Pending`; approval and rejection happen outside this
/// client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Awaiting review
    #[default]
    Pending,
    /// Approved by review
    Approved,
    /// Rejected by review
    Rejected,
}

/// One submitted preference entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceRecord {
    /// Client-generated identifier, also the addressing key suffix
    pub id: RecordId,
    /// Opaque placeholder ciphertext (see [`crate::seal`])
    pub sealed_data: String,
    /// Seconds since epoch, fixed at creation
    pub timestamp: i64,
    /// Account that submitted the record
    pub owner: String,
    /// Display vocabulary label, not enforced server-side
    pub preference_type: String,
    /// Review status
    pub status: RecordStatus,
}

impl PreferenceRecord {
    /// Create a new record with the default `Pending` status
    #[inline]
    #[must_use]
    pub fn new(
        id: RecordId,
        sealed_data: impl Into<String>,
        timestamp: i64,
        owner: impl Into<String>,
        preference_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sealed_data: sealed_data.into(),
            timestamp,
            owner: owner.into(),
            preference_type: preference_type.into(),
            status: RecordStatus::Pending,
        }
    }
}

/// Per-status counts over a loaded record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    /// Total records counted
    pub total: usize,
    /// Records awaiting review
    pub pending: usize,
    /// Approved records
    pub approved: usize,
    /// Rejected records
    pub rejected: usize,
}

impl StatusTally {
    /// Count records by status
    #[must_use]
    pub fn of(records: &[PreferenceRecord]) -> Self {
        let mut tally = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.status {
                RecordStatus::Pending => tally.pending += 1,
                RecordStatus::Approved => tally.approved += 1,
                RecordStatus::Rejected => tally.rejected += 1,
            }
        }
        tally
    }
}
