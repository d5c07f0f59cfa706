//! Error taxonomy for the transfer coordinator
//!
//! Validation failures are recovered locally and returned as typed results,
//! never as generic faults. Errors are `Clone` so an idempotent retry can
//! be answered with the original result verbatim.

use ledger_store::{AccountId, UserId};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Result type for transfer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Transfer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Amount was zero or negative
    #[error("Transfer amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Source and destination are the same account
    #[error("Cannot transfer from account {0} to itself")]
    SelfTransfer(AccountId),

    /// Account does not exist
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Requesting user does not own the source account
    #[error("User {user} does not own source account {account}")]
    Unauthorized {
        /// Requesting user
        user: UserId,
        /// Source account
        account: AccountId,
    },

    /// Source balance below the requested amount; recorded for audit
    #[error("Insufficient funds in account {account} (audit record {transaction_id})")]
    InsufficientFunds {
        /// Source account
        account: AccountId,
        /// Audit record of the rejected attempt
        transaction_id: Uuid,
    },

    /// Scorer failed or timed out under the fail-closed policy
    #[error("Risk scorer unavailable, transfer rejected (audit record {transaction_id})")]
    ScorerUnavailable {
        /// Audit record of the rejected attempt
        transaction_id: Uuid,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store failure after locks were acquired; no partial mutation remains
    #[error("Internal transfer failure: {0}")]
    Internal(String),
}

impl From<ledger_store::Error> for Error {
    fn from(err: ledger_store::Error) -> Self {
        match err {
            ledger_store::Error::AccountNotFound(id) => Error::AccountNotFound(id),
            other => Error::Internal(other.to_string()),
        }
    }
}
