//! Pref Ledger - remote ledger capability surface
//!
//! A thin async boundary over the minimal key-value ledger that persists
//! preference records:
//! - Availability probing
//! - Keyed reads (absence is empty, never an error)
//! - Keyed writes (may fail on transport or explicit rejection)
//! - Key naming conventions for the record index and per-record entries
//!
//! The ledger offers no multi-key atomicity; every write is an independent
//! commit.

// Core modules
pub mod client;
pub mod error;
pub mod keys;

// Re-exports for convenience
pub use client::{Commit, LedgerClient};
pub use error::LedgerError;
pub use keys::{record_key, INDEX_KEY};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
