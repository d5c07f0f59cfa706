//! TransferRail Risk Scoring
//!
//! Fraud-risk capability consumed by the transfer coordinator: a feature
//! vector, a probability score, the scorer seam, and the per-account
//! activity tracker feeding history features. How a production model
//! computes the score is deliberately outside this crate's concern; the
//! coordinator only depends on the [`RiskScorer`] trait.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod features;
pub mod history;
pub mod score;
pub mod scorer;

pub use error::{Error, Result};
pub use features::{Channel, TransactionFeatures};
pub use history::{ActivitySnapshot, ActivityTracker};
pub use score::RiskScore;
pub use scorer::{HeuristicScorer, RiskScorer};
