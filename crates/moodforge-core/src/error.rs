//! Error types for the moodforge session economy.

use crate::ids::IdError;

/// Result type for session-economy operations.
pub type Result<T> = std::result::Result<T, EconomyError>;

/// Errors that can occur in session-economy operations.
#[derive(Debug, thiserror::Error)]
pub enum EconomyError {
    /// Insufficient credits for the operation.
    ///
    /// Recoverable: the caller surfaces an upgrade prompt. No side effects
    /// have occurred when this is returned.
    #[error("insufficient credits: balance={balance}, required={required}")]
    InsufficientCredits {
        /// Current balance.
        balance: i64,
        /// Required amount.
        required: i64,
    },

    /// An amount that must be non-negative was negative.
    #[error("invalid amount: {0}")]
    InvalidAmount(i64),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}
