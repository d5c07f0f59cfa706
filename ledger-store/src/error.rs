//! Error types for the ledger store

use crate::types::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger store errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Balance mutation would leave the account negative
    #[error("Overdraft on account {account}: balance {balance}, delta {delta}")]
    Overdraft {
        /// Account whose balance was guarded
        account: AccountId,
        /// Balance before the rejected mutation
        balance: Decimal,
        /// Rejected delta
        delta: Decimal,
    },

    /// Opening balance was negative
    #[error("Opening balance must be non-negative, got {0}")]
    NegativeOpeningBalance(Decimal),

    /// Transaction not found
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    /// Transaction id already recorded
    #[error("Transaction already recorded: {0}")]
    DuplicateTransaction(Uuid),
}
