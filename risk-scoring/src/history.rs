//! Per-account transfer activity over a sliding window
//!
//! Feeds the `count_24h` and `average_amount` features. Entries outside the
//! window are dropped on both record and snapshot.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use ledger_store::AccountId;
use rust_decimal::Decimal;

/// One recorded transfer
#[derive(Debug, Clone)]
struct ActivityRecord {
    amount: Decimal,
    timestamp: DateTime<Utc>,
}

/// Activity summary for an account at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivitySnapshot {
    /// Transfers in the trailing window
    pub count_24h: u32,

    /// Average transfer amount over the window (zero when no activity)
    pub average_amount: Decimal,
}

/// Sliding-window activity tracker
#[derive(Debug)]
pub struct ActivityTracker {
    window: Duration,
    accounts: DashMap<AccountId, Vec<ActivityRecord>>,
}

impl ActivityTracker {
    /// Create a tracker with the given window
    pub fn new(window_hours: i64) -> Self {
        Self {
            window: Duration::hours(window_hours),
            accounts: DashMap::new(),
        }
    }

    /// Record an executed transfer out of `account`
    pub fn record(&self, account: AccountId, amount: Decimal, timestamp: DateTime<Utc>) {
        let window_start = timestamp - self.window;
        let mut entry = self.accounts.entry(account).or_default();
        entry.retain(|r| r.timestamp >= window_start);
        entry.push(ActivityRecord { amount, timestamp });
    }

    /// Summarize the account's activity as of `now`
    pub fn snapshot(&self, account: AccountId, now: DateTime<Utc>) -> ActivitySnapshot {
        let window_start = now - self.window;

        match self.accounts.get_mut(&account) {
            Some(mut entry) => {
                entry.retain(|r| r.timestamp >= window_start);
                let count = entry.len() as u32;
                let average = if count == 0 {
                    Decimal::ZERO
                } else {
                    entry.iter().map(|r| r.amount).sum::<Decimal>() / Decimal::from(count)
                };
                ActivitySnapshot {
                    count_24h: count,
                    average_amount: average,
                }
            }
            None => ActivitySnapshot {
                count_24h: 0,
                average_amount: Decimal::ZERO,
            },
        }
    }

    /// Forget an account's activity
    pub fn reset_account(&self, account: AccountId) {
        self.accounts.remove(&account);
    }

    /// Number of accounts with tracked activity
    pub fn tracked_accounts(&self) -> usize {
        self.accounts.len()
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new(24)
    }
}
