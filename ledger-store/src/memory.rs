//! In-process ledger implementation
//!
//! Accounts and transactions live in concurrent maps; a durable backend can
//! replace this behind the same traits without touching the coordinator.

use crate::error::{Error, Result};
use crate::locks::{AccountLocks, LockManager};
use crate::store::{LedgerStore, TransactionLog};
use crate::types::{
    Account, AccountId, AccountType, NewTransaction, Transaction, UserId,
};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Default reason attached by a review that flags without one
const DEFAULT_FLAG_REASON: &str = "Suspicious activity";

/// In-memory ledger: account table, transaction log, and lock table
#[derive(Debug, Default)]
pub struct MemoryLedger {
    accounts: DashMap<AccountId, Account>,
    transactions: DashMap<Uuid, Transaction>,
    /// Append order of the log; transaction rows live in `transactions`
    journal: RwLock<Vec<Uuid>>,
    locks: LockManager,
    next_account_id: AtomicU64,
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            next_account_id: AtomicU64::new(1),
            ..Default::default()
        }
    }

    /// Open a new account with an initial balance
    ///
    /// Account opening is outside the transfer pipeline proper but is the
    /// only way balances enter the ledger.
    pub fn open_account(
        &self,
        user_id: UserId,
        account_type: AccountType,
        initial_balance: Decimal,
    ) -> Result<Account> {
        if initial_balance < Decimal::ZERO {
            return Err(Error::NegativeOpeningBalance(initial_balance));
        }

        let id = AccountId::new(self.next_account_id.fetch_add(1, Ordering::Relaxed));
        let account = Account {
            id,
            user_id,
            account_type,
            balance: initial_balance,
            created_at: Utc::now(),
        };
        self.accounts.insert(id, account.clone());
        tracing::info!(account = %id, user = %user_id, balance = %initial_balance, "account opened");
        Ok(account)
    }

    /// Number of accounts in the ledger
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Number of records in the transaction log
    pub fn transaction_count(&self) -> usize {
        self.journal.read().len()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn get_account(&self, id: AccountId) -> Result<Account> {
        self.accounts
            .get(&id)
            .map(|a| a.clone())
            .ok_or(Error::AccountNotFound(id))
    }

    async fn adjust_balance(&self, id: AccountId, delta: Decimal) -> Result<Decimal> {
        let mut account = self.accounts.get_mut(&id).ok_or(Error::AccountNotFound(id))?;

        let new_balance = account.balance + delta;
        if new_balance < Decimal::ZERO {
            return Err(Error::Overdraft {
                account: id,
                balance: account.balance,
                delta,
            });
        }

        account.balance = new_balance;
        tracing::debug!(account = %id, %delta, balance = %new_balance, "balance adjusted");
        Ok(new_balance)
    }

    async fn lock_accounts(&self, a: AccountId, b: AccountId) -> AccountLocks {
        self.locks.lock_pair(a, b).await
    }
}

#[async_trait]
impl TransactionLog for MemoryLedger {
    async fn record(&self, tx: NewTransaction) -> Result<Transaction> {
        let transaction = Transaction {
            id: Uuid::now_v7(),
            from_account: tx.from_account,
            to_account: tx.to_account,
            amount: tx.amount,
            kind: tx.kind,
            status: tx.status,
            risk_score: tx.risk_score,
            flagged: tx.flagged,
            flag_reason: tx.flag_reason,
            created_at: Utc::now(),
        };

        match self.transactions.entry(transaction.id) {
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(transaction.clone());
            }
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(Error::DuplicateTransaction(transaction.id));
            }
        }
        self.journal.write().push(transaction.id);

        tracing::info!(
            transaction = %transaction.id,
            from = %transaction.from_account,
            to = %transaction.to_account,
            amount = %transaction.amount,
            status = ?transaction.status,
            "transaction recorded"
        );
        Ok(transaction)
    }

    async fn transaction(&self, id: Uuid) -> Result<Transaction> {
        self.transactions
            .get(&id)
            .map(|t| t.clone())
            .ok_or(Error::TransactionNotFound(id))
    }

    async fn account_transactions(&self, id: AccountId) -> Vec<Transaction> {
        let journal = self.journal.read();
        journal
            .iter()
            .filter_map(|tx_id| self.transactions.get(tx_id).map(|t| t.clone()))
            .filter(|t| t.from_account == id || t.to_account == id)
            .collect()
    }

    async fn flagged_transactions(&self) -> Vec<Transaction> {
        let journal = self.journal.read();
        journal
            .iter()
            .filter_map(|tx_id| self.transactions.get(tx_id).map(|t| t.clone()))
            .filter(|t| t.flagged)
            .collect()
    }

    async fn apply_review(
        &self,
        id: Uuid,
        flagged: bool,
        reason: Option<String>,
    ) -> Result<Transaction> {
        let mut tx = self
            .transactions
            .get_mut(&id)
            .ok_or(Error::TransactionNotFound(id))?;

        tx.flagged = flagged;
        tx.flag_reason = if flagged {
            Some(reason.unwrap_or_else(|| DEFAULT_FLAG_REASON.to_string()))
        } else {
            None
        };

        tracing::info!(transaction = %id, flagged, "review applied");
        Ok(tx.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;

    fn dec(minor: i64) -> Decimal {
        Decimal::new(minor, 2)
    }

    #[tokio::test]
    async fn test_open_and_get_account() {
        let ledger = MemoryLedger::new();
        let account = ledger
            .open_account(UserId::new(1), AccountType::Savings, dec(100_00))
            .unwrap();

        let fetched = ledger.get_account(account.id).await.unwrap();
        assert_eq!(fetched.balance, dec(100_00));
        assert_eq!(fetched.user_id, UserId::new(1));

        let missing = ledger.get_account(AccountId::new(999)).await;
        assert_eq!(missing, Err(Error::AccountNotFound(AccountId::new(999))));
    }

    #[tokio::test]
    async fn test_negative_opening_balance_rejected() {
        let ledger = MemoryLedger::new();
        let result = ledger.open_account(UserId::new(1), AccountType::Current, dec(-1));
        assert!(matches!(result, Err(Error::NegativeOpeningBalance(_))));
    }

    #[tokio::test]
    async fn test_adjust_balance_guards_overdraft() {
        let ledger = MemoryLedger::new();
        let account = ledger
            .open_account(UserId::new(1), AccountType::Current, dec(50_00))
            .unwrap();

        let new_balance = ledger.adjust_balance(account.id, dec(-30_00)).await.unwrap();
        assert_eq!(new_balance, dec(20_00));

        let overdraft = ledger.adjust_balance(account.id, dec(-20_01)).await;
        assert!(matches!(overdraft, Err(Error::Overdraft { .. })));

        // Balance unchanged after the rejected mutation
        let fetched = ledger.get_account(account.id).await.unwrap();
        assert_eq!(fetched.balance, dec(20_00));
    }

    #[tokio::test]
    async fn test_record_and_list_transactions() {
        let ledger = MemoryLedger::new();
        let a = AccountId::new(1);
        let b = AccountId::new(2);
        let c = AccountId::new(3);

        let tx1 = ledger
            .record(NewTransaction::approved(a, b, dec(10_00), 0.1))
            .await
            .unwrap();
        let tx2 = ledger
            .record(NewTransaction::flagged(b, c, dec(20_00), 0.8, "High Fraud Risk"))
            .await
            .unwrap();

        assert_eq!(ledger.transaction(tx1.id).await.unwrap().status, TransactionStatus::Approved);

        let for_b = ledger.account_transactions(b).await;
        assert_eq!(for_b.len(), 2);
        assert_eq!(for_b[0].id, tx1.id);
        assert_eq!(for_b[1].id, tx2.id);

        let for_c = ledger.account_transactions(c).await;
        assert_eq!(for_c.len(), 1);

        let flagged = ledger.flagged_transactions().await;
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].id, tx2.id);
    }

    #[tokio::test]
    async fn test_apply_review_clears_flag() {
        let ledger = MemoryLedger::new();
        let a = AccountId::new(1);
        let b = AccountId::new(2);

        let tx = ledger
            .record(NewTransaction::flagged(a, b, dec(10_00), 0.9, "High Fraud Risk"))
            .await
            .unwrap();

        let reviewed = ledger.apply_review(tx.id, false, None).await.unwrap();
        assert!(!reviewed.flagged);
        assert_eq!(reviewed.flag_reason, None);
        // Everything else untouched
        assert_eq!(reviewed.status, TransactionStatus::Flagged);
        assert_eq!(reviewed.amount, dec(10_00));

        assert!(ledger.flagged_transactions().await.is_empty());
    }

    #[tokio::test]
    async fn test_apply_review_flags_with_default_reason() {
        let ledger = MemoryLedger::new();
        let tx = ledger
            .record(NewTransaction::approved(
                AccountId::new(1),
                AccountId::new(2),
                dec(10_00),
                0.2,
            ))
            .await
            .unwrap();

        let reviewed = ledger.apply_review(tx.id, true, None).await.unwrap();
        assert!(reviewed.flagged);
        assert_eq!(reviewed.flag_reason.as_deref(), Some("Suspicious activity"));
    }
}
