//! Synchronization configuration

use std::time::Duration;

/// Tunable parameters for the sync core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Delay before a `Success` status auto-resets to `Idle`
    pub success_reset: Duration,
    /// Delay before an `Error` status auto-resets to `Idle`
    pub error_reset: Duration,
}

impl SyncConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With success reset delay
    #[inline]
    #[must_use]
    pub fn with_success_reset(mut self, delay: Duration) -> Self {
        self.success_reset = delay;
        self
    }

    /// With error reset delay
    #[inline]
    #[must_use]
    pub fn with_error_reset(mut self, delay: Duration) -> Self {
        self.error_reset = delay;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            success_reset: Duration::from_secs(2),
            error_reset: Duration::from_secs(3),
        }
    }
}
