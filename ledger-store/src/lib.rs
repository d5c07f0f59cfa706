//! TransferRail Ledger Store
//!
//! Durable holder of account balances and the append-only transaction log.
//!
//! # Architecture
//!
//! - **Explicit interface**: all mutation goes through [`LedgerStore`] and
//!   [`TransactionLog`]; there is no ambient session state
//! - **Per-account locking**: exclusive account locks acquired in ascending
//!   id order, released on every exit path
//! - **Overdraft guard**: [`LedgerStore::adjust_balance`] rejects any
//!   mutation that would leave a balance negative
//! - **Append-only log**: transaction records are immutable evidence of
//!   every transfer attempt; the admin review action is the single
//!   permitted post-hoc mutation

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod error;
pub mod locks;
pub mod memory;
pub mod store;
pub mod types;

// Re-exports
pub use error::{Error, Result};
pub use locks::{AccountLocks, LockManager};
pub use memory::MemoryLedger;
pub use store::{LedgerStore, TransactionLog};
pub use types::{
    Account, AccountId, AccountType, NewTransaction, Transaction, TransactionKind,
    TransactionStatus, UserId,
};
