//! Pref Record - preference data model and wire codec
//!
//! Defines the record persisted in the ledger and the transforms that move
//! it across the wire:
//! - [`PreferenceRecord`] and its client-generated [`RecordId`]
//! - JSON wire codec (`encode`/`decode`), failure-tolerant by contract
//! - Placeholder sealing (`seal`/`unseal`) standing in for a real
//!   confidentiality scheme
//!
//! Decoding is recoverable: a malformed payload is a per-record condition,
//! never a reason to abandon the rest of a load.

// Core modules
pub mod codec;
pub mod record;
pub mod seal;

// Re-exports for convenience
pub use codec::{decode, encode, CodecError};
pub use record::{PreferenceRecord, RecordId, RecordStatus, StatusTally};
pub use seal::{seal, unseal, SealError, SubmissionInput};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
