//! Preference repository
//!
//! Orchestrates a full load of the visible record set: availability
//! probe, index read, per-id fetch and decode, stable sort. The central
//! contract is partial-failure isolation: one unreadable record never
//! prevents loading the others. Every drop is classified and reported
//! instead of silently swallowed.
//!
//! Per-id fetches run sequentially, trading latency for deterministic
//! ordering and bounded load on the remote store. Owner filtering is a
//! display concern and lives in the session module, not here.

use crate::error::{DropReason, Dropped, LoadError};
use crate::index;
use pref_ledger::{record_key, LedgerClient};
use pref_record::{decode, PreferenceRecord, RecordId, StatusTally};
use std::sync::Arc;

/// Outcome of a repository load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Decoded records, timestamp-descending, index order on ties
    pub records: Vec<PreferenceRecord>,
    /// Indexed ids that could not be loaded, with classified reasons
    pub dropped: Vec<Dropped>,
}

impl LoadReport {
    /// Per-status counts over the loaded records
    #[inline]
    #[must_use]
    pub fn tally(&self) -> StatusTally {
        StatusTally::of(&self.records)
    }
}

/// Loads the record set from the ledger
#[derive(Clone)]
pub struct PreferenceRepository {
    ledger: Arc<dyn LedgerClient>,
}

impl PreferenceRepository {
    /// Create a repository over a ledger client
    #[inline]
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    /// Load every indexed record
    ///
    /// # Errors
    /// - `LoadError::ServiceUnavailable` when the probe reports the
    ///   service down
    /// - `LoadError::Transport` when the probe or index read cannot reach
    ///   the ledger
    ///
    /// Per-record failures do not error; they land in
    /// [`LoadReport::dropped`].
    pub async fn load(&self) -> Result<LoadReport, LoadError> {
        if !self.ledger.is_available().await? {
            return Err(LoadError::ServiceUnavailable);
        }

        let ids = index::read_index(self.ledger.as_ref()).await?;
        tracing::debug!(indexed = ids.len(), "loading preference records");

        let mut records = Vec::with_capacity(ids.len());
        let mut dropped = Vec::new();

        for id in ids {
            match self.fetch_one(&id).await {
                Ok(record) => records.push(record),
                Err(reason) => {
                    tracing::warn!(id = %id, reason = %reason, "dropping unreadable record");
                    dropped.push(Dropped { id, reason });
                }
            }
        }

        // Stable sort keeps index order for equal timestamps.
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        if !dropped.is_empty() {
            tracing::warn!(
                loaded = records.len(),
                dropped = dropped.len(),
                "load completed with drops"
            );
        }

        Ok(LoadReport { records, dropped })
    }

    /// Load, mapping whole-load failures to an empty report
    ///
    /// Display-boundary convenience: an unavailable or unreachable ledger
    /// shows as an empty set rather than an error surface.
    pub async fn load_or_empty(&self) -> LoadReport {
        match self.load().await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(error = %e, "load failed, showing empty set");
                LoadReport::default()
            }
        }
    }

    async fn fetch_one(&self, id: &RecordId) -> Result<PreferenceRecord, DropReason> {
        let bytes = self
            .ledger
            .get_data(&record_key(id.as_str()))
            .await
            .map_err(|e| DropReason::Transport(e.to_string()))?;
        if bytes.is_empty() {
            return Err(DropReason::Missing);
        }
        decode(id.clone(), &bytes).map_err(|e| DropReason::Malformed(e.to_string()))
    }
}

impl std::fmt::Debug for PreferenceRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceRepository").finish_non_exhaustive()
    }
}
