//! The quota engine — per-user daily allowances and the spend log.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use aureus_transactions::SpendRecord;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::QuotaError;

/// Default daily allowance per user.
pub const DAILY_QUOTA: u64 = 100;

/// A user's quota bucket. `balance` never exceeds the daily allowance.
struct QuotaAccount {
    balance: u64,
    last_issued: NaiveDate,
}

/// Mutable quota state. Only ever touched under the engine lock.
#[derive(Default)]
struct QuotaState {
    accounts: HashMap<String, QuotaAccount>,
    spends: Vec<SpendRecord>,
}

/// Per-user daily-reset token bucket with an append-only spend log.
///
/// The reset is lazy: a user's bucket refills the first time it is touched
/// on a UTC calendar day that differs from `last_issued`. There are no
/// timers. State-machine methods take an explicit `now`; the conveniences
/// without a time parameter use the wall clock.
///
/// The in-memory spend log only grows. Each successful spend rewrites the
/// full log to the snapshot path while still holding the engine lock, so
/// whole-file rewrites never interleave.
pub struct QuotaEngine {
    state: Mutex<QuotaState>,
    log_path: PathBuf,
    daily_quota: u64,
}

impl QuotaEngine {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self::with_quota(log_path, DAILY_QUOTA)
    }

    /// Create an engine with a non-default daily allowance.
    pub fn with_quota(log_path: impl Into<PathBuf>, daily_quota: u64) -> Self {
        Self {
            state: Mutex::new(QuotaState::default()),
            log_path: log_path.into(),
            daily_quota,
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn daily_quota(&self) -> u64 {
        self.daily_quota
    }

    fn state(&self) -> MutexGuard<'_, QuotaState> {
        self.state.lock().expect("quota state lock poisoned")
    }

    /// Refill a user's bucket if it has not been issued today.
    ///
    /// The comparison is strict inequality on the calendar date, so a clock
    /// that moves backwards across midnight also triggers a refill. The
    /// bucket is tied to "today", not to elapsed time.
    fn issue<'a>(
        accounts: &'a mut HashMap<String, QuotaAccount>,
        username: &str,
        today: NaiveDate,
        daily_quota: u64,
    ) -> &'a mut QuotaAccount {
        match accounts.entry(username.to_string()) {
            Entry::Occupied(entry) => {
                let account = entry.into_mut();
                if account.last_issued != today {
                    account.balance = daily_quota;
                    account.last_issued = today;
                    tracing::debug!(account = username, %today, "daily quota reset");
                }
                account
            }
            Entry::Vacant(entry) => {
                tracing::debug!(account = username, %today, "quota account issued");
                entry.insert(QuotaAccount {
                    balance: daily_quota,
                    last_issued: today,
                })
            }
        }
    }

    /// Ensure the user's bucket is issued for the day containing `now`.
    /// Idempotent within a day.
    pub fn issue_at(&self, username: &str, now: DateTime<Utc>) {
        let mut state = self.state();
        Self::issue(&mut state.accounts, username, now.date_naive(), self.daily_quota);
    }

    /// Quota remaining for the day containing `now` (issues first).
    pub fn balance_at(&self, username: &str, now: DateTime<Utc>) -> u64 {
        let mut state = self.state();
        Self::issue(&mut state.accounts, username, now.date_naive(), self.daily_quota).balance
    }

    /// Quota remaining today.
    pub fn balance(&self, username: &str) -> u64 {
        self.balance_at(username, Utc::now())
    }

    /// Burn `amount` from the sender's bucket for the day containing `now`.
    ///
    /// A business rejection ([`QuotaError::InsufficientQuota`],
    /// [`QuotaError::InvalidAmount`]) leaves all state unchanged. A
    /// persistence failure surfaces as [`QuotaError::Persist`] with the
    /// in-memory debit and log entry retained; the snapshot file, not the
    /// engine, is what lags.
    pub fn spend_at(
        &self,
        sender: &str,
        recipient: &str,
        amount: u64,
        now: DateTime<Utc>,
    ) -> Result<(), QuotaError> {
        if amount == 0 {
            return Err(QuotaError::InvalidAmount);
        }
        let mut state = self.state();
        let account = Self::issue(&mut state.accounts, sender, now.date_naive(), self.daily_quota);
        if account.balance < amount {
            return Err(QuotaError::InsufficientQuota {
                needed: amount,
                available: account.balance,
            });
        }
        account.balance -= amount;
        let remaining = account.balance;

        state.spends.push(SpendRecord {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
            timestamp: now,
        });
        self.persist_log(&state.spends)?;

        tracing::info!(sender, recipient, amount, remaining, "quota spend recorded");
        Ok(())
    }

    /// Burn `amount` from the sender's bucket today.
    pub fn spend(&self, sender: &str, recipient: &str, amount: u64) -> Result<(), QuotaError> {
        self.spend_at(sender, recipient, amount, Utc::now())
    }

    /// Number of spends recorded since startup.
    pub fn spend_count(&self) -> usize {
        self.state().spends.len()
    }

    /// Snapshot of the spend log, oldest first.
    pub fn spends(&self) -> Vec<SpendRecord> {
        self.state().spends.clone()
    }

    /// Rewrite the full spend log to the snapshot path.
    fn persist_log(&self, spends: &[SpendRecord]) -> Result<(), QuotaError> {
        let json = serde_json::to_vec_pretty(spends)
            .map_err(|e| QuotaError::Persist(e.to_string()))?;
        fs::write(&self.log_path, json)
            .map_err(|e| QuotaError::Persist(format!("{}: {e}", self.log_path.display())))
    }
}
