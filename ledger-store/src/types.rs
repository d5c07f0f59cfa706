//! Core types for the ledger store
//!
//! All types are designed for:
//! - Exact arithmetic (Decimal for money, never floating-point)
//! - Append-only audit trails (transactions are immutable evidence)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Account identifier
///
/// Ordering on account ids defines the global lock-acquisition order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AccountId(u64);

impl AccountId {
    /// Create new account ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get raw value
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owning-user identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UserId(u64);

impl UserId {
    /// Create new user ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get raw value
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Savings account
    Savings,
    /// Current account
    Current,
}

/// A customer account
///
/// Invariant: `balance >= 0` at all observable points. The balance is
/// mutated only through [`crate::LedgerStore::adjust_balance`] while the
/// account's exclusive lock is held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID
    pub id: AccountId,

    /// Owning user
    pub user_id: UserId,

    /// Account type
    pub account_type: AccountType,

    /// Current balance (exact decimal, never negative)
    pub balance: Decimal,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Transaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Two-account funds transfer
    Transfer,
}

/// Transaction outcome status, set exactly once at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Executed with a risk score attached
    Approved,
    /// Executed under the fail-open fallback without a risk score
    ScoreUnavailable,
    /// Withheld pending review; no funds moved
    Flagged,
    /// Rejected for insufficient funds; no funds moved
    RejectedInsufficientFunds,
    /// Rejected under the fail-closed fallback; no funds moved
    RejectedScorerUnavailable,
}

impl TransactionStatus {
    /// True if funds moved for this transaction
    pub fn is_executed(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Approved | TransactionStatus::ScoreUnavailable
        )
    }

    /// True if the transfer was rejected outright
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            TransactionStatus::RejectedInsufficientFunds
                | TransactionStatus::RejectedScorerUnavailable
        )
    }
}

/// A persisted transaction record
///
/// Immutable after creation: the outcome fields are set exactly once by the
/// coordinator. The only permitted post-hoc mutation is the admin review
/// action ([`crate::TransactionLog::apply_review`]), which touches `flagged`
/// and `flag_reason` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction ID (UUIDv7 for time-ordering)
    pub id: Uuid,

    /// Source account
    pub from_account: AccountId,

    /// Destination account
    pub to_account: AccountId,

    /// Transfer amount (always positive)
    pub amount: Decimal,

    /// Transaction kind
    pub kind: TransactionKind,

    /// Outcome status
    pub status: TransactionStatus,

    /// Fraud probability in [0, 1], set only if scoring ran
    pub risk_score: Option<f64>,

    /// Flagged for review
    pub flagged: bool,

    /// Reason the transaction was flagged
    pub flag_reason: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A transaction record as submitted by the coordinator
///
/// The log assigns the id and timestamp on [`crate::TransactionLog::record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Source account
    pub from_account: AccountId,

    /// Destination account
    pub to_account: AccountId,

    /// Transfer amount
    pub amount: Decimal,

    /// Transaction kind
    pub kind: TransactionKind,

    /// Outcome status
    pub status: TransactionStatus,

    /// Fraud probability, if scoring ran
    pub risk_score: Option<f64>,

    /// Flagged for review
    pub flagged: bool,

    /// Flag reason
    pub flag_reason: Option<String>,
}

impl NewTransaction {
    /// Executed transfer with a risk score
    pub fn approved(from: AccountId, to: AccountId, amount: Decimal, score: f64) -> Self {
        Self {
            from_account: from,
            to_account: to,
            amount,
            kind: TransactionKind::Transfer,
            status: TransactionStatus::Approved,
            risk_score: Some(score),
            flagged: false,
            flag_reason: None,
        }
    }

    /// Executed transfer without a score (fail-open fallback)
    pub fn approved_unscored(from: AccountId, to: AccountId, amount: Decimal) -> Self {
        Self {
            from_account: from,
            to_account: to,
            amount,
            kind: TransactionKind::Transfer,
            status: TransactionStatus::ScoreUnavailable,
            risk_score: None,
            flagged: false,
            flag_reason: None,
        }
    }

    /// Transfer withheld pending review
    pub fn flagged(
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        score: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            from_account: from,
            to_account: to,
            amount,
            kind: TransactionKind::Transfer,
            status: TransactionStatus::Flagged,
            risk_score: Some(score),
            flagged: true,
            flag_reason: Some(reason.into()),
        }
    }

    /// Transfer rejected for insufficient funds
    pub fn rejected_insufficient_funds(from: AccountId, to: AccountId, amount: Decimal) -> Self {
        Self {
            from_account: from,
            to_account: to,
            amount,
            kind: TransactionKind::Transfer,
            status: TransactionStatus::RejectedInsufficientFunds,
            risk_score: None,
            flagged: false,
            flag_reason: None,
        }
    }

    /// Transfer rejected under the fail-closed fallback
    pub fn rejected_scorer_unavailable(from: AccountId, to: AccountId, amount: Decimal) -> Self {
        Self {
            from_account: from,
            to_account: to,
            amount,
            kind: TransactionKind::Transfer,
            status: TransactionStatus::RejectedScorerUnavailable,
            risk_score: None,
            flagged: false,
            flag_reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_ordering() {
        assert!(AccountId::new(1) < AccountId::new(2));
        assert_eq!(AccountId::new(7).value(), 7);
    }

    #[test]
    fn test_status_classification() {
        assert!(TransactionStatus::Approved.is_executed());
        assert!(TransactionStatus::ScoreUnavailable.is_executed());
        assert!(!TransactionStatus::Flagged.is_executed());
        assert!(TransactionStatus::RejectedInsufficientFunds.is_rejected());
        assert!(TransactionStatus::RejectedScorerUnavailable.is_rejected());
        assert!(!TransactionStatus::Flagged.is_rejected());
    }

    #[test]
    fn test_flagged_constructor_sets_reason() {
        let tx = NewTransaction::flagged(
            AccountId::new(1),
            AccountId::new(2),
            Decimal::new(50_00, 2),
            0.9,
            "High Fraud Risk",
        );
        assert!(tx.flagged);
        assert_eq!(tx.status, TransactionStatus::Flagged);
        assert_eq!(tx.flag_reason.as_deref(), Some("High Fraud Risk"));
        assert_eq!(tx.risk_score, Some(0.9));
    }
}
