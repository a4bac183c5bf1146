//! Provider configuration.

/// Placeholder value some setups leave in their env files; treated the same
/// as no key at all.
const PLACEHOLDER_API_KEY: &str = "sk-your-ai-key-here";

/// Default Stability API base URL.
const DEFAULT_API_URL: &str = "https://api.stability.ai";

/// Default engine for image-to-image (fast, good structure preservation).
const DEFAULT_ENGINE_ID: &str = "stable-diffusion-v1-6";

/// Which generation path a session will take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    /// A credential is configured; real provider calls are made.
    Live,

    /// No credential; every generation is simulated.
    Simulated,
}

/// Provider configuration loaded from environment variables.
///
/// The absence of an API key never raises an error: it deterministically
/// selects [`ProviderMode::Simulated`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API key for the image provider, if configured.
    pub api_key: Option<String>,

    /// Provider API base URL.
    pub api_url: String,

    /// Engine/model identifier.
    pub engine_id: String,
}

impl ProviderConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `STABILITY_API_KEY`, `STABILITY_API_URL` and
    /// `STABILITY_ENGINE_ID`, all optional.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: sanitize_key(std::env::var("STABILITY_API_KEY").ok()),
            api_url: std::env::var("STABILITY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
            engine_id: std::env::var("STABILITY_ENGINE_ID")
                .unwrap_or_else(|_| DEFAULT_ENGINE_ID.into()),
        }
    }

    /// Build a configuration with an explicit key (tests, embedding apps).
    #[must_use]
    pub fn with_key(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_url: api_url.into(),
            engine_id: DEFAULT_ENGINE_ID.into(),
        }
    }

    /// The mode this configuration selects.
    #[must_use]
    pub fn mode(&self) -> ProviderMode {
        if self.api_key.is_some() {
            ProviderMode::Live
        } else {
            ProviderMode::Simulated
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.into(),
            engine_id: DEFAULT_ENGINE_ID.into(),
        }
    }
}

/// Drop empty or placeholder keys.
fn sanitize_key(key: Option<String>) -> Option<String> {
    key.filter(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY)
}
