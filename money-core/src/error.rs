//! Error types for monetary operations

use thiserror::Error;

/// Result type for monetary operations
pub type Result<T> = std::result::Result<T, Error>;

/// Monetary errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Operation attempted across differing currencies
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// Currency code of the left-hand operand
        expected: &'static str,
        /// Currency code of the right-hand operand
        actual: &'static str,
    },

    /// Out-of-range argument (part count, weights, rate)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// i128 minor-unit arithmetic overflow
    #[error("Amount overflow: {0}")]
    Overflow(String),

    /// Lossy float conversion rejected at the explicit boundary
    #[error("Precision loss: {0}")]
    PrecisionLoss(String),
}
