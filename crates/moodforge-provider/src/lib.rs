//! Provider adapters for moodforge.
//!
//! The image provider is an opaque capability behind the
//! [`ExpressionProvider`] trait. Two implementations ship here:
//!
//! - [`StabilityClient`] — a real adapter for Stability-compatible
//!   image-to-image APIs.
//! - [`SimulatedProvider`] — a deterministic placeholder generator used when
//!   no credential is configured or as the fallback after a provider error.
//!
//! Which one a session uses is decided by [`ProviderConfig`]: the absence of
//! an API key is not an error, it selects simulation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod request;
pub mod simulated;
pub mod stability;

pub use config::{ProviderConfig, ProviderMode};
pub use error::ProviderError;
pub use request::{
    ExpressionProvider, ImageRef, ProviderRequest, DEFAULT_GUIDANCE_SCALE, DEFAULT_IMAGE_STRENGTH,
    DEFAULT_STEPS,
};
pub use simulated::{SimulatedProvider, SIMULATED_LATENCY};
pub use stability::StabilityClient;
