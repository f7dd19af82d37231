//! Submission orchestrator
//!
//! Drives the non-atomic two-step registration: validate, seal, write
//! the record entry, then append its id to the index. The two writes are
//! independent commits; when the first lands and the second fails the
//! record is persisted but unreachable. That window is surfaced
//! explicitly as [`SubmitError::Detached`] rather than papered over.
//!
//! Every outcome is mirrored onto the status machine with a classified,
//! human-readable message.

use crate::error::SubmitError;
use crate::index;
use crate::repository::{LoadReport, PreferenceRepository};
use crate::session::SessionContext;
use crate::status::StatusMachine;
use pref_ledger::{record_key, Commit, LedgerClient, LedgerError};
use pref_record::{encode, seal, PreferenceRecord, RecordId, SubmissionInput};
use std::sync::Arc;

/// Result of a fully committed submission
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// Id of the newly registered record
    pub id: RecordId,
    /// Acknowledgement of the record write
    pub commit: Commit,
    /// Visible set reloaded after the commit
    pub refreshed: LoadReport,
}

/// Validates, registers, and reports preference submissions
pub struct SubmissionOrchestrator {
    ledger: Arc<dyn LedgerClient>,
    repository: PreferenceRepository,
    status: Arc<StatusMachine>,
}

impl SubmissionOrchestrator {
    /// Create an orchestrator over a ledger client and status machine
    #[inline]
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerClient>, status: Arc<StatusMachine>) -> Self {
        Self {
            repository: PreferenceRepository::new(Arc::clone(&ledger)),
            ledger,
            status,
        }
    }

    /// The repository used for post-commit refreshes
    #[inline]
    #[must_use]
    pub fn repository(&self) -> &PreferenceRepository {
        &self.repository
    }

    /// Submit a preference for the session's active account
    ///
    /// # Workflow
    /// 1. Validate required fields (no ledger interaction on failure)
    /// 2. Reject if another submission is pending
    /// 3. Seal the input, generate the id, build the record
    /// 4. Phase one: write the record entry
    /// 5. Phase two: append the id to the index
    /// 6. Reload the visible set
    ///
    /// # Errors
    /// See [`SubmitError`]; every post-validation failure also lands on
    /// the status machine as a classified `Error`.
    pub async fn submit(
        &self,
        session: &SessionContext,
        input: SubmissionInput,
    ) -> Result<SubmissionOutcome, SubmitError> {
        if input.preference_type.is_empty() {
            return Err(SubmitError::Validation("preference type"));
        }
        if input.details.is_empty() {
            return Err(SubmitError::Validation("details"));
        }
        let owner = session
            .active_account()
            .await
            .ok_or(SubmitError::NotConnected)?;
        if self.status.is_pending().await {
            return Err(SubmitError::InFlight);
        }

        self.status.begin("Sealing preference for submission").await;

        match self.register(owner, &input).await {
            Ok((id, commit)) => {
                tracing::info!(id = %id, "preference registered");
                self.status.succeed("Preference submitted").await;
                let refreshed = self.repository.load_or_empty().await;
                Ok(SubmissionOutcome {
                    id,
                    commit,
                    refreshed,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "submission failed");
                self.status.fail(e.user_message()).await;
                Err(e)
            }
        }
    }

    /// Probe the ledger and reflect the result on the status machine
    ///
    /// # Errors
    /// `LedgerError::Transport` when the probe itself cannot reach the
    /// service.
    pub async fn check_availability(&self) -> Result<bool, LedgerError> {
        match self.ledger.is_available().await {
            Ok(available) => {
                let message = if available {
                    "Ledger service is available"
                } else {
                    "Ledger service is unavailable"
                };
                self.status.succeed(message).await;
                Ok(available)
            }
            Err(e) => {
                self.status.fail("Failed to check availability").await;
                Err(e)
            }
        }
    }

    /// The two-step registration protocol
    async fn register(
        &self,
        owner: String,
        input: &SubmissionInput,
    ) -> Result<(RecordId, Commit), SubmitError> {
        let sealed = seal(input)?;
        let id = RecordId::generate();
        let record = PreferenceRecord::new(
            id.clone(),
            sealed,
            chrono::Utc::now().timestamp(),
            owner,
            input.preference_type.clone(),
        );
        let payload = encode(&record)?;

        // Phase one: the record entry.
        let commit = self
            .ledger
            .set_data(&record_key(id.as_str()), payload)
            .await
            .map_err(SubmitError::from_write_failure)?;

        // Phase two: the index append. An independent commit; failing
        // here leaves the record persisted but unreachable.
        index::append_id(self.ledger.as_ref(), &id)
            .await
            .map_err(|source| SubmitError::Detached {
                id: id.clone(),
                source,
            })?;

        Ok((id, commit))
    }
}

impl std::fmt::Debug for SubmissionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionOrchestrator")
            .finish_non_exhaustive()
    }
}
