//! The generation orchestrator.
//!
//! Coordinates a single generation attempt: checks the ledger, invokes the
//! provider (or the simulated fallback), settles the ledger on success.
//!
//! State machine: `Idle → Validating → Requesting → {Succeeded | Failed}`.
//! Exactly one request may be active per session; a second `generate` call
//! while one is validating or requesting is rejected.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use moodforge_core::{
    CreditLedger, EconomyError, Mood, RequestId, GENERATION_COST_CREDITS, GENERATION_XP_AWARD,
    NEGATIVE_PROMPT,
};
use moodforge_provider::{ExpressionProvider, ImageRef, ProviderRequest, SimulatedProvider};

use crate::error::{EngineError, Result};

/// Status of the session's generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// No request active.
    Idle,

    /// Balance check in progress.
    Validating,

    /// Provider call in flight.
    Requesting,

    /// Terminal: a result is available.
    Succeeded,

    /// Terminal: the attempt failed (insufficient credits or abandoned).
    Failed,
}

/// The generation request active in a session.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Time-ordered request id.
    pub id: RequestId,

    /// The mood selected for this attempt.
    pub mood: Mood,

    /// Current status.
    pub status: RequestStatus,

    /// The generated image, present only once succeeded.
    pub result: Option<ImageRef>,
}

/// The outcome of a completed generation attempt.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    /// The request this outcome belongs to.
    pub request_id: RequestId,

    /// The mood that was generated.
    pub mood: Mood,

    /// The generated image.
    pub image: ImageRef,

    /// True when the fallback simulation produced the image instead of the
    /// real provider. Callers and audits can always tell the paths apart.
    pub simulated: bool,

    /// Balance after the settled deduction.
    pub balance: i64,

    /// XP total after the award.
    pub xp: i64,

    /// Level after the award.
    pub level: i64,

    /// When the attempt finished.
    pub finished_at: DateTime<Utc>,
}

/// Orchestrates generation attempts for one session.
pub struct GenerationOrchestrator {
    ledger: Arc<CreditLedger>,
    provider: Option<Arc<dyn ExpressionProvider>>,
    simulator: SimulatedProvider,
    current: Mutex<Option<GenerationRequest>>,
}

impl GenerationOrchestrator {
    /// Create an orchestrator over the session ledger.
    ///
    /// `provider` is the real capability; `None` means every generation
    /// takes the simulated path.
    #[must_use]
    pub fn new(ledger: Arc<CreditLedger>, provider: Option<Arc<dyn ExpressionProvider>>) -> Self {
        Self {
            ledger,
            provider,
            simulator: SimulatedProvider::new(),
            current: Mutex::new(None),
        }
    }

    /// Replace the fallback simulator (tests, custom latency).
    #[must_use]
    pub fn with_simulator(mut self, simulator: SimulatedProvider) -> Self {
        self.simulator = simulator;
        self
    }

    /// Run one generation attempt.
    ///
    /// On provider success the ledger settles atomically (deduct
    /// [`GENERATION_COST_CREDITS`], award [`GENERATION_XP_AWARD`]) and the
    /// outcome carries `simulated = false`. On provider error or absent
    /// provider the simulated fallback runs, then settles identically with
    /// `simulated = true`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::GenerationInFlight`] if a request is already
    ///   validating or requesting (no side effects).
    /// - [`EngineError::Economy`] with `InsufficientCredits` if the balance
    ///   cannot cover the attempt (no ledger mutation, no provider call).
    pub async fn generate(&self, source_image: Vec<u8>, mood: Mood) -> Result<GenerationOutcome> {
        let request_id = self.begin(mood)?;
        let flight = Flight::new(self);

        // Validating: fast-fail before touching the provider. The settle at
        // the end re-checks atomically, so this can never overdraw.
        let balance = self.ledger.balance();
        if balance < GENERATION_COST_CREDITS {
            tracing::debug!(
                request_id = %request_id,
                balance,
                required = GENERATION_COST_CREDITS,
                "Generation rejected: insufficient credits"
            );
            flight.complete(RequestStatus::Failed, None);
            return Err(EconomyError::InsufficientCredits {
                balance,
                required: GENERATION_COST_CREDITS,
            }
            .into());
        }

        self.set_status(RequestStatus::Requesting);
        let provider_request =
            ProviderRequest::new(source_image, mood.prompt(), NEGATIVE_PROMPT, mood.label());

        let (image, simulated) = match &self.provider {
            Some(provider) => match provider.generate(&provider_request).await {
                Ok(image) => (image, false),
                Err(e) => {
                    // Fail-open policy: absorb the provider failure, but
                    // keep the fallback distinctly logged and tagged.
                    tracing::warn!(
                        request_id = %request_id,
                        mood = %mood,
                        error = %e,
                        "Provider call failed, falling back to simulated generation"
                    );
                    (self.simulate(&provider_request, mood).await, true)
                }
            },
            None => {
                tracing::info!(
                    request_id = %request_id,
                    mood = %mood,
                    "No provider configured, using simulated generation"
                );
                (self.simulate(&provider_request, mood).await, true)
            }
        };

        let receipt = match self
            .ledger
            .settle_generation(GENERATION_COST_CREDITS, GENERATION_XP_AWARD)
        {
            Ok(receipt) => receipt,
            Err(e) => {
                flight.complete(RequestStatus::Failed, None);
                return Err(e.into());
            }
        };

        tracing::info!(
            request_id = %request_id,
            mood = %mood,
            simulated,
            balance = receipt.balance,
            xp = receipt.xp,
            "Generation succeeded"
        );
        flight.complete(RequestStatus::Succeeded, Some(image.clone()));

        Ok(GenerationOutcome {
            request_id,
            mood,
            image,
            simulated,
            balance: receipt.balance,
            xp: receipt.xp,
            level: receipt.level,
            finished_at: receipt.settled_at,
        })
    }

    /// Current request status (`Idle` when no request exists).
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.lock()
            .as_ref()
            .map_or(RequestStatus::Idle, |request| request.status)
    }

    /// Copy of the active request, if any.
    #[must_use]
    pub fn current_request(&self) -> Option<GenerationRequest> {
        self.lock().clone()
    }

    /// Discard a consumed request, e.g. when a new upload begins.
    ///
    /// Returns `false` (and does nothing) while a request is in flight.
    pub fn reset(&self) -> bool {
        let mut current = self.lock();
        match current.as_ref().map(|request| request.status) {
            Some(RequestStatus::Validating | RequestStatus::Requesting) => false,
            _ => {
                *current = None;
                true
            }
        }
    }

    /// Start a new request, rejecting reentrancy.
    fn begin(&self, mood: Mood) -> Result<RequestId> {
        let mut current = self.lock();
        if let Some(request) = current.as_ref() {
            if matches!(
                request.status,
                RequestStatus::Validating | RequestStatus::Requesting
            ) {
                return Err(EngineError::GenerationInFlight);
            }
        }
        let id = RequestId::generate();
        *current = Some(GenerationRequest {
            id,
            mood,
            status: RequestStatus::Validating,
            result: None,
        });
        Ok(id)
    }

    /// The simulated path; the simulator itself cannot fail.
    async fn simulate(&self, request: &ProviderRequest, mood: Mood) -> ImageRef {
        self.simulator
            .generate(request)
            .await
            .unwrap_or_else(|_| SimulatedProvider::placeholder(mood.label()))
    }

    fn set_status(&self, status: RequestStatus) {
        if let Some(request) = self.lock().as_mut() {
            request.status = status;
        }
    }

    fn finish(&self, status: RequestStatus, result: Option<ImageRef>) {
        if let Some(request) = self.lock().as_mut() {
            request.status = status;
            request.result = result;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<GenerationRequest>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks the active request failed if the attempt is abandoned mid-flight
/// (caller dropped the future), so the session never wedges in `Requesting`.
struct Flight<'a> {
    orchestrator: &'a GenerationOrchestrator,
    done: bool,
}

impl<'a> Flight<'a> {
    fn new(orchestrator: &'a GenerationOrchestrator) -> Self {
        Self {
            orchestrator,
            done: false,
        }
    }

    fn complete(mut self, status: RequestStatus, result: Option<ImageRef>) {
        self.orchestrator.finish(status, result);
        self.done = true;
    }
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.orchestrator.finish(RequestStatus::Failed, None);
        }
    }
}
