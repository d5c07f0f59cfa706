//! Storage contracts consumed by the transfer coordinator
//!
//! The coordinator never mutates balances or transaction rows directly;
//! these traits are the only mutation primitives it uses, so the store (not
//! the coordinator) is the final guard against negative balances.

use crate::error::Result;
use crate::locks::AccountLocks;
use crate::types::{Account, AccountId, NewTransaction, Transaction};
use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Account balance store
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Look up an account
    ///
    /// Fails with [`crate::Error::AccountNotFound`] if the account does not
    /// exist.
    async fn get_account(&self, id: AccountId) -> Result<Account>;

    /// Atomically adjust a balance by `delta`, returning the new balance
    ///
    /// Fails with [`crate::Error::Overdraft`] if the result would be
    /// negative; the balance is left unchanged on failure.
    async fn adjust_balance(&self, id: AccountId, delta: Decimal) -> Result<Decimal>;

    /// Acquire exclusive locks on both accounts in ascending-id order
    ///
    /// The guard releases on drop, covering every exit path.
    async fn lock_accounts(&self, a: AccountId, b: AccountId) -> AccountLocks;
}

/// Append-only transaction log
///
/// Rows are never updated or deleted except through [`Self::apply_review`],
/// the single permitted post-hoc mutation.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    /// Append a transaction record, assigning its id and timestamp
    async fn record(&self, tx: NewTransaction) -> Result<Transaction>;

    /// Look up a transaction by id
    async fn transaction(&self, id: Uuid) -> Result<Transaction>;

    /// All transactions touching an account (either direction), append order
    async fn account_transactions(&self, id: AccountId) -> Vec<Transaction>;

    /// All currently flagged transactions, append order
    async fn flagged_transactions(&self) -> Vec<Transaction>;

    /// Admin review: set or clear the flag on an existing record
    ///
    /// Mutates `flagged` and `flag_reason` only; every other field is
    /// immutable after creation. Returns the updated record.
    async fn apply_review(
        &self,
        id: Uuid,
        flagged: bool,
        reason: Option<String>,
    ) -> Result<Transaction>;
}
