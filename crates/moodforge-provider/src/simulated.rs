//! The fallback simulation provider.
//!
//! Synthesizes a deterministic placeholder after a fixed simulated latency.
//! Used when no credential is configured, and as the fallback path after a
//! real provider error.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::request::{ExpressionProvider, ImageRef, ProviderRequest};

/// Fixed simulated generation latency.
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(2000);

/// Deterministic placeholder generator.
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    latency: Duration,
}

impl SimulatedProvider {
    /// Create a simulator with the standard latency.
    #[must_use]
    pub fn new() -> Self {
        Self {
            latency: SIMULATED_LATENCY,
        }
    }

    /// Create a simulator with a custom latency.
    #[must_use]
    pub const fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// The placeholder image for a mood label. Pure and deterministic.
    #[must_use]
    pub fn placeholder(mood_label: &str) -> ImageRef {
        let text = mood_label.to_uppercase().replace(' ', "+");
        ImageRef::new(format!(
            "https://placehold.co/1024x1024/1a1a1a/FFF?text={text}+Generated"
        ))
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExpressionProvider for SimulatedProvider {
    async fn generate(&self, request: &ProviderRequest) -> Result<ImageRef, ProviderError> {
        tokio::time::sleep(self.latency).await;
        Ok(Self::placeholder(&request.mood_label))
    }
}
