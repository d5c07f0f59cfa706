//! Per-account exclusive locks
//!
//! Concurrent transfers sharing an account are serialized by an exclusive
//! lock per account. Transfers touching disjoint account pairs proceed in
//! parallel. Deadlock between transfers referencing the same pair in
//! opposite directions is prevented by always acquiring in ascending
//! account-id order.
//!
//! The locks are `tokio::sync::Mutex` so a guard may be held across the
//! risk-scorer await without blocking the runtime.

use crate::types::AccountId;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Table of per-account locks
#[derive(Debug, Default)]
pub struct LockManager {
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
}

impl LockManager {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, id: AccountId) -> Arc<Mutex<()>> {
        self.locks.entry(id).or_default().clone()
    }

    /// Acquire exclusive locks on both accounts, ascending-id order
    ///
    /// The returned guard releases both locks when dropped, on every exit
    /// path. Locking the same id twice takes a single lock.
    pub async fn lock_pair(&self, a: AccountId, b: AccountId) -> AccountLocks {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };

        let first_guard = self.lock_for(first).lock_owned().await;
        let second_guard = if first == second {
            None
        } else {
            Some(self.lock_for(second).lock_owned().await)
        };

        AccountLocks {
            _first: first_guard,
            _second: second_guard,
        }
    }
}

/// Scoped handle over a locked account pair
///
/// Both locks are released when this guard is dropped.
#[derive(Debug)]
pub struct AccountLocks {
    _first: OwnedMutexGuard<()>,
    _second: Option<OwnedMutexGuard<()>>,
}
