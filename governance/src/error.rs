//! Error types for the governance layer

use thiserror::Error;

/// Result type for governance operations
pub type Result<T> = std::result::Result<T, Error>;

/// Governance errors
#[derive(Debug, Error)]
pub enum Error {
    /// Out-of-range argument (confidence, thresholds, capacity)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transaction lifecycle violation
    #[error("Invalid state: cannot {attempted} a {from} transaction")]
    InvalidState {
        /// State the transaction was in
        from: &'static str,
        /// Transition that was attempted
        attempted: &'static str,
    },

    /// Ledger is at its configured maximum entry count
    #[error("Ledger capacity exceeded: maximum {max} entries")]
    CapacityExceeded {
        /// Configured maximum
        max: usize,
    },

    /// Monetary error from the value layer
    #[error("Money error: {0}")]
    Money(#[from] money_core::Error),

    /// Canonical serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
