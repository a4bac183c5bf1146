//! Error types for provider adapters.

/// Errors that can occur when calling an image provider.
///
/// These never reach the end user as hard failures: the orchestrator absorbs
/// them and falls back to the simulated path.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider API returned a non-success status.
    #[error("provider API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the provider, if any.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed provider payload: {0}")]
    MalformedPayload(String),
}
