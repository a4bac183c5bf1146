//! Stability API client implementation.
//!
//! Talks to the `image-to-image` endpoint of a Stability-compatible API.
//! The source image goes in a multipart form together with weighted text
//! prompts; the response carries base64 PNG artifacts.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::request::{ExpressionProvider, ImageRef, ProviderRequest};

/// Request timeout; image generation is slow.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Stability API client.
#[derive(Debug, Clone)]
pub struct StabilityClient {
    client: Client,
    base_url: String,
    api_key: String,
    engine_id: String,
}

/// Response body of a successful generation.
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    artifacts: Vec<Artifact>,
}

/// One generated image, base64-encoded PNG.
#[derive(Debug, Deserialize)]
struct Artifact {
    base64: String,
}

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: String,
}

impl StabilityClient {
    /// Create a client from a configuration carrying an API key.
    ///
    /// Returns `None` when no key is configured; the caller falls back to
    /// the simulated provider.
    #[must_use]
    pub fn from_config(config: &ProviderConfig) -> Option<Self> {
        config
            .api_key
            .as_ref()
            .map(|key| Self::new(&config.api_url, key, &config.engine_id))
    }

    /// Create a new client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        }
    }

    /// Build the multipart form for an image-to-image call.
    fn build_form(request: &ProviderRequest) -> multipart::Form {
        multipart::Form::new()
            .part(
                "init_image",
                multipart::Part::bytes(request.image.clone()).file_name("init_image.png"),
            )
            .text("init_image_mode", "IMAGE_STRENGTH")
            .text("image_strength", request.strength.to_string())
            .text("text_prompts[0][text]", request.prompt.clone())
            .text("text_prompts[0][weight]", "1")
            .text("text_prompts[1][text]", request.negative_prompt.clone())
            .text("text_prompts[1][weight]", "-1")
            .text("cfg_scale", request.guidance_scale.to_string())
            .text("samples", "1")
            .text("steps", request.steps.to_string())
    }

    /// Convert a response into an [`ImageRef`] or a [`ProviderError`].
    async fn handle_response(response: reqwest::Response) -> Result<ImageRef, ProviderError> {
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ApiErrorResponse>().await {
                Ok(body) => body.message,
                Err(_) => format!("HTTP {status}"),
            };
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedPayload(e.to_string()))?;

        let artifact = body
            .artifacts
            .first()
            .ok_or_else(|| ProviderError::MalformedPayload("no artifacts in response".into()))?;

        // Validate the payload before handing out a data URI.
        base64::engine::general_purpose::STANDARD
            .decode(&artifact.base64)
            .map_err(|e| ProviderError::MalformedPayload(format!("invalid base64 artifact: {e}")))?;

        Ok(ImageRef::png_base64(&artifact.base64))
    }
}

#[async_trait]
impl ExpressionProvider for StabilityClient {
    async fn generate(&self, request: &ProviderRequest) -> Result<ImageRef, ProviderError> {
        let url = format!(
            "{}/v1/generation/{}/image-to-image",
            self.base_url, self.engine_id
        );

        tracing::debug!(
            engine = %self.engine_id,
            mood = %request.mood_label,
            steps = request.steps,
            "Calling image provider"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .multipart(Self::build_form(request))
            .send()
            .await?;

        Self::handle_response(response).await
    }
}
