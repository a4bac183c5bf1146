//! Error types for the engine.

use moodforge_core::EconomyError;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced to callers of the engine.
///
/// Provider failures are deliberately absent: they are absorbed by the
/// simulated fallback and only visible as `simulated = true` on the outcome.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A ledger operation failed (insufficient credits, invalid amount).
    #[error(transparent)]
    Economy(#[from] EconomyError),

    /// A second generate call arrived while one was already in flight for
    /// this session.
    #[error("a generation is already in flight for this session")]
    GenerationInFlight,
}

impl EngineError {
    /// Whether this error is the recoverable out-of-credits case that
    /// should surface an upgrade prompt.
    #[must_use]
    pub fn is_insufficient_credits(&self) -> bool {
        matches!(
            self,
            Self::Economy(EconomyError::InsufficientCredits { .. })
        )
    }
}
