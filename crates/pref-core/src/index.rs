//! Record id index
//!
//! The index is the sole enumeration mechanism: a record the index does
//! not list is invisible even if its entry exists. It lives under one
//! well-known key as a JSON array of ids, mutated only by append.
//!
//! A malformed index payload is treated as empty rather than raised; a
//! corrupted index must not brick the whole application. The append is a
//! read-modify-write with no compare-and-swap, so two concurrent appends
//! can race and silently lose one id. Documented limitation, not
//! mitigated here.

use pref_ledger::{Commit, LedgerClient, LedgerError, INDEX_KEY};
use pref_record::RecordId;

/// Read the ordered id index
///
/// Missing payload yields an empty sequence. A payload that fails to
/// parse is logged and also yields an empty sequence; parse failure never
/// reaches the caller.
///
/// # Errors
/// `LedgerError::Transport` only, when the read itself fails.
pub async fn read_index(ledger: &dyn LedgerClient) -> Result<Vec<RecordId>, LedgerError> {
    let bytes = ledger.get_data(INDEX_KEY).await?;
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_slice::<Vec<String>>(&bytes) {
        Ok(ids) => Ok(ids.into_iter().map(RecordId::from_string).collect()),
        Err(e) => {
            tracing::warn!(error = %e, "index payload malformed, treating as empty");
            Ok(Vec::new())
        }
    }
}

/// Append `id` to the index
///
/// Read-modify-write: reads the current index, appends, writes the whole
/// sequence back. Prior ids keep their relative order.
///
/// # Errors
/// `LedgerError` from the index write (transport or rejection).
pub async fn append_id(ledger: &dyn LedgerClient, id: &RecordId) -> Result<Commit, LedgerError> {
    let mut ids: Vec<String> = read_index(ledger)
        .await?
        .into_iter()
        .map(|id| id.as_str().to_string())
        .collect();
    ids.push(id.as_str().to_string());

    let payload = serde_json::to_vec(&ids)
        .map_err(|e| LedgerError::Transport(format!("index serialization: {e}")))?;
    ledger.set_data(INDEX_KEY, payload).await
}
