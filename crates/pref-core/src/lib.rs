//! Pref Core - synchronization and consistency logic
//!
//! The client-side core between the UI and the remote key-value ledger:
//! - Reads and appends the record id index
//! - Loads the record set with partial-failure isolation
//! - Runs the non-atomic two-step submission protocol
//! - Drives the timed transaction status machine
//! - Threads the wallet session through operations that need the active
//!   account
//!
//! # Example
//!
//! ```rust,ignore
//! use pref_core::{StatusMachine, SubmissionOrchestrator, SyncConfig};
//! use pref_record::SubmissionInput;
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     ledger: Arc<dyn pref_ledger::LedgerClient>,
//! #     session: pref_core::SessionContext,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let status = Arc::new(StatusMachine::new(SyncConfig::default()));
//! let orchestrator = SubmissionOrchestrator::new(ledger, status);
//!
//! let input = SubmissionInput::new("Visit Frequency", "monthly", "");
//! let outcome = orchestrator.submit(&session, input).await?;
//!
//! println!("registered {}", outcome.id);
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod index;
pub mod repository;
pub mod session;
pub mod status;
pub mod submit;

// Re-exports for convenience
pub use config::SyncConfig;
pub use error::{DropReason, Dropped, LoadError, ProviderError, SubmitError};
pub use repository::{LoadReport, PreferenceRepository};
pub use session::{SessionContext, WalletProvider};
pub use status::{StatusMachine, TransactionStatus};
pub use submit::{SubmissionOrchestrator, SubmissionOutcome};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the sync core
    pub use crate::{
        LoadReport, PreferenceRepository, SessionContext, StatusMachine, SubmissionOrchestrator,
        SyncConfig, TransactionStatus, WalletProvider,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
