//! Core types and session-economy logic for moodforge.
//!
//! This crate provides the foundational types used throughout the moodforge
//! platform:
//!
//! - **Identifiers**: `SessionId`, `RequestId`
//! - **Accounts**: `UserAccount` and its gamification counters
//! - **Ledger**: `CreditLedger`, the single owner of balance invariants
//! - **Moods**: the `Mood` expression set and its prompt table
//! - **Pricing**: `PricingTable`, `RegionCode`, timezone-based detection
//!
//! # Credit unit
//!
//! **1 credit = 1 generation attempt.**
//!
//! Credits are whole numbers stored as `i64`; the ledger never lets the
//! balance go negative, and deduction only happens atomically together with
//! a successful generation outcome.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod error;
pub mod ids;
pub mod ledger;
pub mod mood;
pub mod pricing;

pub use account::{
    UserAccount, AD_REWARD_CREDITS, GENERATION_COST_CREDITS, GENERATION_XP_AWARD, XP_PER_LEVEL,
};
pub use error::{EconomyError, Result};
pub use ids::{IdError, RequestId, SessionId};
pub use ledger::{CreditLedger, SettleReceipt};
pub use mood::{prompt_for_id, Mood, DEFAULT_PROMPT, NEGATIVE_PROMPT};
pub use pricing::{
    resolve_region, FixedRegion, PricingTable, PricingTier, RegionCode, RegionDetector,
    TimezoneHeuristic,
};
