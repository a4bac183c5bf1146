//! Per-session context.
//!
//! A `Session` owns one ledger, one orchestrator and one reward timer.
//! Nothing is shared across sessions, so a multi-user deployment simply
//! holds one `Session` per user.

use std::sync::Arc;

use moodforge_core::{
    CreditLedger, Mood, PricingTable, PricingTier, RegionCode, RegionDetector, SessionId,
    TimezoneHeuristic, UserAccount,
};
use moodforge_provider::{ExpressionProvider, ProviderConfig, ProviderMode, StabilityClient};

use crate::orchestrator::{GenerationOrchestrator, GenerationOutcome, RequestStatus};
use crate::reward::{RewardPhase, RewardTimer};
use crate::Result;

/// Credits a fresh session starts with.
pub const DEFAULT_STARTING_CREDITS: i64 = 5;

/// Configuration for a new session.
pub struct SessionConfig {
    /// Starting credit balance.
    pub starting_credits: i64,

    /// Provider configuration; an absent credential selects simulation.
    pub provider: ProviderConfig,

    /// Region detection capability.
    pub detector: Box<dyn RegionDetector>,
}

impl SessionConfig {
    /// Configuration using the environment for the provider and the given
    /// timezone for region detection.
    #[must_use]
    pub fn from_env(timezone: impl Into<String>) -> Self {
        Self {
            starting_credits: DEFAULT_STARTING_CREDITS,
            provider: ProviderConfig::from_env(),
            detector: Box::new(TimezoneHeuristic::new(timezone)),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_credits: DEFAULT_STARTING_CREDITS,
            provider: ProviderConfig::default(),
            detector: Box::new(TimezoneHeuristic::new(String::new())),
        }
    }
}

/// One user session: ledger, generation orchestration, reward timer and
/// resolved pricing, fully isolated from other sessions.
pub struct Session {
    id: SessionId,
    ledger: Arc<CreditLedger>,
    orchestrator: GenerationOrchestrator,
    reward: RewardTimer,
    pricing: PricingTable,
    region: RegionCode,
}

impl Session {
    /// Create a session from the given configuration.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let id = SessionId::generate();
        let ledger = Arc::new(CreditLedger::with_credits(config.starting_credits));

        let provider: Option<Arc<dyn ExpressionProvider>> = match config.provider.mode() {
            ProviderMode::Live => StabilityClient::from_config(&config.provider)
                .map(|client| Arc::new(client) as Arc<dyn ExpressionProvider>),
            ProviderMode::Simulated => None,
        };
        if provider.is_some() {
            tracing::info!(session_id = %id, "Image provider configured, live generation enabled");
        } else {
            tracing::warn!(
                session_id = %id,
                "No provider credential configured - generations will be simulated"
            );
        }

        let region = config.detector.detect();
        tracing::debug!(session_id = %id, region = %region, "Session region resolved");

        Self {
            id,
            ledger: Arc::clone(&ledger),
            orchestrator: GenerationOrchestrator::new(Arc::clone(&ledger), provider),
            reward: RewardTimer::new(ledger),
            pricing: PricingTable::default(),
            region,
        }
    }

    /// The session id.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The session ledger.
    #[must_use]
    pub fn ledger(&self) -> &Arc<CreditLedger> {
        &self.ledger
    }

    /// Snapshot of the account for display layers.
    #[must_use]
    pub fn account(&self) -> UserAccount {
        self.ledger.snapshot()
    }

    /// Run one generation attempt for this session.
    ///
    /// # Errors
    ///
    /// See [`GenerationOrchestrator::generate`].
    pub async fn generate(&self, source_image: Vec<u8>, mood: Mood) -> Result<GenerationOutcome> {
        self.orchestrator.generate(source_image, mood).await
    }

    /// Current generation-request status.
    #[must_use]
    pub fn generation_status(&self) -> RequestStatus {
        self.orchestrator.status()
    }

    /// Discard a consumed generation request (new upload).
    pub fn reset_generation(&self) -> bool {
        self.orchestrator.reset()
    }

    /// Start the ad-reward countdown.
    pub fn watch_ad(&self) {
        self.reward.start();
    }

    /// Cancel the ad-reward countdown, forfeiting the reward.
    pub fn cancel_ad(&self) -> bool {
        self.reward.cancel()
    }

    /// Phase of the reward countdown.
    #[must_use]
    pub fn reward_phase(&self) -> RewardPhase {
        self.reward.phase()
    }

    /// Seconds left in the reward countdown.
    #[must_use]
    pub fn reward_remaining_seconds(&self) -> u32 {
        self.reward.remaining_seconds()
    }

    /// The detected pricing region.
    #[must_use]
    pub fn region(&self) -> RegionCode {
        self.region
    }

    /// The pricing tier for this session's region. Total, never fails.
    #[must_use]
    pub fn pricing_tier(&self) -> &PricingTier {
        self.pricing.tier(self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodforge_core::FixedRegion;

    fn session_with(starting_credits: i64, region: RegionCode) -> Session {
        Session::new(SessionConfig {
            starting_credits,
            provider: ProviderConfig::default(),
            detector: Box::new(FixedRegion(region)),
        })
    }

    #[tokio::test]
    async fn session_resolves_injected_region() {
        let session = session_with(5, RegionCode::In);
        assert_eq!(session.region(), RegionCode::In);
        assert_eq!(session.pricing_tier().currency, "INR");
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let a = session_with(5, RegionCode::Us);
        let b = session_with(1, RegionCode::Us);

        a.ledger().deduct(3).unwrap();
        assert_eq!(a.ledger().balance(), 2);
        assert_eq!(b.ledger().balance(), 1);
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn default_config_detects_global_region() {
        let session = Session::new(SessionConfig::default());
        assert_eq!(session.region(), RegionCode::Global);
        assert_eq!(session.pricing_tier().display_name, "Global");
    }
}
