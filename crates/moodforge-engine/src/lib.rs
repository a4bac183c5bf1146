//! Generation orchestration and reward timer for moodforge.
//!
//! This crate wires the session economy together:
//!
//! - [`GenerationOrchestrator`] — the `Idle → Validating → Requesting →
//!   {Succeeded | Failed}` state machine for a single generation attempt,
//!   including the provider/fallback policy.
//! - [`RewardTimer`] — the ad-reward countdown that credits the ledger
//!   exactly once on uninterrupted completion.
//! - [`Session`] — the per-user context owning the ledger, orchestrator and
//!   timer; sessions are fully isolated from each other.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod orchestrator;
pub mod reward;
pub mod session;

pub use error::{EngineError, Result};
pub use orchestrator::{
    GenerationOrchestrator, GenerationOutcome, GenerationRequest, RequestStatus,
};
pub use reward::{RewardPhase, RewardTimer, REWARD_COUNTDOWN_SECONDS};
pub use session::{Session, SessionConfig, DEFAULT_STARTING_CREDITS};
