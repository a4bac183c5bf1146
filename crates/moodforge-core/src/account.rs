//! Account types for moodforge.
//!
//! This module defines the in-memory user account with its credit balance
//! and gamification counters. Accounts live for the duration of a session;
//! persisted storage is an external collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credits consumed by one generation attempt.
pub const GENERATION_COST_CREDITS: i64 = 1;

/// XP awarded for each successful generation.
pub const GENERATION_XP_AWARD: i64 = 50;

/// Credits granted for watching an ad to completion.
pub const AD_REWARD_CREDITS: i64 = 2;

/// XP required per level beyond the first.
pub const XP_PER_LEVEL: i64 = 500;

/// A user account for one session.
///
/// Tracks the consumable credit balance plus the gamification counters
/// (xp, level, streak). Invariants: `credits >= 0`, `xp >= 0`, `level >= 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// Current credit balance.
    pub credits: i64,

    /// Accumulated experience points.
    pub xp: i64,

    /// Current level, derived from xp.
    pub level: i64,

    /// Consecutive-day usage streak.
    pub streak: i64,

    /// Lifetime credits spent on generations.
    pub lifetime_spent: i64,

    /// Lifetime credits earned from rewards.
    pub lifetime_earned: i64,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    /// Create a new account with the given starting balance.
    #[must_use]
    pub fn new(starting_credits: i64) -> Self {
        let now = Utc::now();
        Self {
            credits: starting_credits.max(0),
            xp: 0,
            level: 1,
            streak: 0,
            lifetime_spent: 0,
            lifetime_earned: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the balance covers a deduction.
    #[must_use]
    pub fn has_sufficient_credits(&self, amount: i64) -> bool {
        self.credits >= amount
    }

    /// Add experience points and recompute the level.
    pub fn add_xp(&mut self, amount: i64) {
        self.xp += amount.max(0);
        self.level = 1 + self.xp / XP_PER_LEVEL;
        self.updated_at = Utc::now();
    }
}

impl Default for UserAccount {
    fn default() -> Self {
        Self::new(0)
    }
}
