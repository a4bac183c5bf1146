//! The provider capability and its request/result types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProviderError;

/// How strongly the source image constrains the output.
///
/// 0.35 keeps the face geometry while changing the expression heavily.
pub const DEFAULT_IMAGE_STRENGTH: f32 = 0.35;

/// Diffusion steps per generation.
pub const DEFAULT_STEPS: u32 = 30;

/// Classifier-free guidance scale.
pub const DEFAULT_GUIDANCE_SCALE: f32 = 7.0;

/// An opaque handle to an image.
///
/// Holds a URL or data URI; the core never inspects image contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap a URL or data URI.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Build a PNG data URI from a base64 payload.
    #[must_use]
    pub fn png_base64(payload: &str) -> Self {
        Self(format!("data:image/png;base64,{payload}"))
    }

    /// The underlying URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single image-to-image generation request.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// The source image bytes (the user's photo).
    pub image: Vec<u8>,

    /// Positive prompt selected by the mood.
    pub prompt: String,

    /// Shared negative prompt.
    pub negative_prompt: String,

    /// Label used for placeholder output and telemetry.
    pub mood_label: String,

    /// Image strength (0.0..=1.0).
    pub strength: f32,

    /// Diffusion steps.
    pub steps: u32,

    /// Guidance scale.
    pub guidance_scale: f32,
}

impl ProviderRequest {
    /// Build a request with the default tuning parameters.
    #[must_use]
    pub fn new(
        image: Vec<u8>,
        prompt: impl Into<String>,
        negative_prompt: impl Into<String>,
        mood_label: impl Into<String>,
    ) -> Self {
        Self {
            image,
            prompt: prompt.into(),
            negative_prompt: negative_prompt.into(),
            mood_label: mood_label.into(),
            strength: DEFAULT_IMAGE_STRENGTH,
            steps: DEFAULT_STEPS,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
        }
    }
}

/// External capability that performs image-to-image transformation.
#[async_trait]
pub trait ExpressionProvider: Send + Sync {
    /// Generate an expressive variant of the source image.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on a non-success response or a malformed
    /// payload.
    async fn generate(&self, request: &ProviderRequest) -> Result<ImageRef, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_ref_png_data_uri() {
        let image = ImageRef::png_base64("aGVsbG8=");
        assert_eq!(image.as_str(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn request_defaults() {
        let request = ProviderRequest::new(vec![1, 2, 3], "prompt", "negative", "Ultra Shock");
        assert!((request.strength - 0.35).abs() < f32::EPSILON);
        assert_eq!(request.steps, 30);
        assert!((request.guidance_scale - 7.0).abs() < f32::EPSILON);
    }
}
