//! Error types for ledger transport
//!
//! Distinguishes infrastructure failures from explicit rejection by the
//! account holder. Callers classify on the variant, never on message text;
//! the message sniffing providers force on us is confined to
//! [`LedgerError::from_provider_message`].

/// Errors surfaced by remote ledger operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Remote call failed (network or provider infrastructure)
    #[error("transport failure: {0}")]
    Transport(String),

    /// The account holder explicitly rejected the commit
    #[error("commit rejected: {0}")]
    Rejected(String),
}

/// Signature substring providers embed in rejection messages
const REJECTION_SIGNATURE: &str = "user rejected";

impl LedgerError {
    /// Classify a raw provider error message
    ///
    /// Providers report rejection and infrastructure failures through the
    /// same untyped message channel; the rejection signature is the only
    /// way to tell them apart.
    #[must_use]
    pub fn from_provider_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.to_lowercase().contains(REJECTION_SIGNATURE) {
            Self::Rejected(message)
        } else {
            Self::Transport(message)
        }
    }

    /// Check if this failure is an explicit rejection by the account holder
    #[inline]
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
