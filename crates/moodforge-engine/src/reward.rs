//! The ad-reward countdown timer.
//!
//! `Idle → Counting(n) → Rewarded`, with `Counting(n) → Idle` on cancel.
//! Reaching zero credits the ledger exactly once: the grant and the
//! zero-crossing happen in one atomic step under the state lock, so a
//! cancel racing the final tick can never both forfeit and grant.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use moodforge_core::{CreditLedger, AD_REWARD_CREDITS};

/// Countdown length in seconds.
pub const REWARD_COUNTDOWN_SECONDS: u32 = 5;

/// Phase of the reward session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPhase {
    /// No countdown running.
    Idle,

    /// Counting down; the reward is not yet earned.
    Counting,

    /// The countdown completed and the reward was granted.
    Rewarded,
}

#[derive(Debug)]
struct TimerState {
    phase: RewardPhase,
    remaining_seconds: u32,
    /// Bumped on every start/cancel; stale tick tasks see a mismatch and
    /// exit without touching anything.
    epoch: u64,
}

/// Countdown timer granting bonus credits on uninterrupted completion.
///
/// At most one countdown is active; starting a new one cancels the prior
/// one without granting its reward.
pub struct RewardTimer {
    ledger: Arc<CreditLedger>,
    state: Arc<Mutex<TimerState>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl RewardTimer {
    /// Create a timer feeding the session ledger.
    #[must_use]
    pub fn new(ledger: Arc<CreditLedger>) -> Self {
        Self {
            ledger,
            state: Arc::new(Mutex::new(TimerState {
                phase: RewardPhase::Idle,
                remaining_seconds: 0,
                epoch: 0,
            })),
            task: Mutex::new(None),
        }
    }

    /// Start (or restart) the countdown at [`REWARD_COUNTDOWN_SECONDS`].
    ///
    /// Any prior active countdown is cancelled without granting its reward.
    pub fn start(&self) {
        let epoch = {
            let mut state = lock(&self.state);
            state.epoch += 1;
            state.phase = RewardPhase::Counting;
            state.remaining_seconds = REWARD_COUNTDOWN_SECONDS;
            state.epoch
        };

        tracing::debug!(epoch, seconds = REWARD_COUNTDOWN_SECONDS, "Reward countdown started");

        let state = Arc::clone(&self.state);
        let ledger = Arc::clone(&self.ledger);
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                if !tick(&state, &ledger, epoch) {
                    break;
                }
            }
        });

        if let Some(stale) = lock(&self.task).replace(handle) {
            stale.abort();
        }
    }

    /// Cancel an active countdown, forfeiting the reward.
    ///
    /// Returns `true` if a countdown was actually cancelled. No ledger
    /// mutation happens; a countdown that already completed stays Rewarded.
    pub fn cancel(&self) -> bool {
        let cancelled = {
            let mut state = lock(&self.state);
            if state.phase == RewardPhase::Counting {
                state.phase = RewardPhase::Idle;
                state.remaining_seconds = 0;
                state.epoch += 1;
                true
            } else {
                false
            }
        };

        if let Some(task) = lock(&self.task).take() {
            task.abort();
        }

        if cancelled {
            tracing::debug!("Reward countdown cancelled, reward forfeited");
        }
        cancelled
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RewardPhase {
        lock(&self.state).phase
    }

    /// Seconds left in the countdown (0 when not counting).
    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        lock(&self.state).remaining_seconds
    }
}

impl Drop for RewardTimer {
    fn drop(&mut self) {
        // Never leave a tick task dangling past its owner.
        if let Some(task) = lock(&self.task).take() {
            task.abort();
        }
    }
}

/// One countdown tick. Returns `true` while the countdown should keep
/// running.
///
/// The decrement, the zero-crossing transition and the credit grant all
/// happen under the state lock, which is what makes the grant exactly-once
/// against racing cancels and restarts.
fn tick(state: &Mutex<TimerState>, ledger: &CreditLedger, epoch: u64) -> bool {
    let mut state = lock(state);
    if state.epoch != epoch || state.phase != RewardPhase::Counting {
        return false;
    }

    state.remaining_seconds -= 1;
    if state.remaining_seconds > 0 {
        return true;
    }

    state.phase = RewardPhase::Rewarded;
    match ledger.credit(AD_REWARD_CREDITS) {
        Ok(balance) => {
            tracing::info!(reward = AD_REWARD_CREDITS, balance, "Ad reward granted");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to grant ad reward");
        }
    }
    false
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
