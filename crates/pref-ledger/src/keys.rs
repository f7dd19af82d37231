//! Key naming conventions
//!
//! Two kinds of entries live in the ledger: the id index under one
//! well-known key, and one record entry per id. A record absent from the
//! index is invisible to enumeration even if its entry exists.

/// Well-known key holding the JSON array of record ids
pub const INDEX_KEY: &str = "preference_keys";

/// Key addressing the record entry for `id`
#[inline]
#[must_use]
pub fn record_key(id: &str) -> String {
    format!("preference_{id}")
}
