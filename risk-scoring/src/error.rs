//! Error types for risk scoring

use thiserror::Error;

/// Risk scoring error
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Scorer unreachable or failed to produce a score
    #[error("Risk scorer unavailable: {0}")]
    Unavailable(String),

    /// Model produced an unusable result
    #[error("Model error: {0}")]
    Model(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
