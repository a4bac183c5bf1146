//! The credit ledger.
//!
//! This module owns the numeric balance invariants. Every mutation is a
//! single indivisible check-and-update under one lock, so two rapid
//! generate actions can never both succeed against the same pre-deduction
//! balance.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::UserAccount;
use crate::error::{EconomyError, Result};

/// Receipt for an atomically settled generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleReceipt {
    /// Balance after the deduction.
    pub balance: i64,

    /// XP total after the award.
    pub xp: i64,

    /// Level after the award.
    pub level: i64,

    /// When the settlement happened.
    pub settled_at: DateTime<Utc>,
}

/// The credit ledger for one session.
///
/// Invariant: the balance never goes negative. `deduct` either reduces the
/// balance and returns the new value, or fails with
/// [`EconomyError::InsufficientCredits`] leaving the account untouched.
#[derive(Debug)]
pub struct CreditLedger {
    inner: Mutex<UserAccount>,
}

impl CreditLedger {
    /// Create a ledger over the given account.
    #[must_use]
    pub fn new(account: UserAccount) -> Self {
        Self {
            inner: Mutex::new(account),
        }
    }

    /// Create a ledger with a fresh account holding `starting_credits`.
    #[must_use]
    pub fn with_credits(starting_credits: i64) -> Self {
        Self::new(UserAccount::new(starting_credits))
    }

    /// Current balance.
    #[must_use]
    pub fn balance(&self) -> i64 {
        self.lock().credits
    }

    /// Atomically deduct `amount` credits.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InsufficientCredits`] if the balance does not
    /// cover `amount` (the account is left unchanged), or
    /// [`EconomyError::InvalidAmount`] for a negative amount.
    pub fn deduct(&self, amount: i64) -> Result<i64> {
        if amount < 0 {
            return Err(EconomyError::InvalidAmount(amount));
        }
        let mut account = self.lock();
        if account.credits < amount {
            return Err(EconomyError::InsufficientCredits {
                balance: account.credits,
                required: amount,
            });
        }
        account.credits -= amount;
        account.lifetime_spent += amount;
        account.updated_at = Utc::now();
        Ok(account.credits)
    }

    /// Atomically add `amount` credits. No upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidAmount`] for a negative amount.
    pub fn credit(&self, amount: i64) -> Result<i64> {
        if amount < 0 {
            return Err(EconomyError::InvalidAmount(amount));
        }
        let mut account = self.lock();
        account.credits += amount;
        account.lifetime_earned += amount;
        account.updated_at = Utc::now();
        Ok(account.credits)
    }

    /// Settle a successful generation: deduct `cost` and award `xp` in one
    /// atomic step.
    ///
    /// Either both changes apply, or neither does.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InsufficientCredits`] if the balance does not
    /// cover `cost`, or [`EconomyError::InvalidAmount`] for negative inputs.
    pub fn settle_generation(&self, cost: i64, xp: i64) -> Result<SettleReceipt> {
        if cost < 0 {
            return Err(EconomyError::InvalidAmount(cost));
        }
        if xp < 0 {
            return Err(EconomyError::InvalidAmount(xp));
        }
        let mut account = self.lock();
        if account.credits < cost {
            return Err(EconomyError::InsufficientCredits {
                balance: account.credits,
                required: cost,
            });
        }
        account.credits -= cost;
        account.lifetime_spent += cost;
        account.add_xp(xp);
        Ok(SettleReceipt {
            balance: account.credits,
            xp: account.xp,
            level: account.level,
            settled_at: account.updated_at,
        })
    }

    /// Copy of the account for display layers.
    #[must_use]
    pub fn snapshot(&self) -> UserAccount {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, UserAccount> {
        // A poisoned lock only means a panic elsewhere; the account data
        // itself is still consistent (every mutation is complete-or-absent).
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
