//! TransferRail Transfer Engine
//!
//! The transfer coordinator: moves money between two accounts while
//! consulting the fraud-risk scorer and enforcing the financial invariants.
//!
//! # Invariants
//!
//! - No overdraft: a balance is never observed negative
//! - Exactly-once mutation: an idempotency token collapses client retries
//! - Serialized effects: transfers sharing an account never interleave
//! - Auditable outcome: every admissible attempt leaves one transaction
//!   record, whether approved, rejected, or flagged

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod coordinator;
pub mod error;
mod idempotency;

pub use config::{FallbackPolicy, ScorerConfig, TransferConfig};
pub use coordinator::{TransferCoordinator, TransferOutcome, TransferRequest};
pub use error::{Error, Result};
