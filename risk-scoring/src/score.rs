//! Fraud probability score

use serde::{Deserialize, Serialize};

/// Fraud probability in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct RiskScore(f64);

impl RiskScore {
    /// Create a score, clamping into [0, 1]
    ///
    /// Non-finite inputs are treated as zero risk; a scorer that cannot
    /// produce a finite probability should fail instead.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    /// Raw probability
    pub fn value(&self) -> f64 {
        self.0
    }

    /// True if the score is strictly above the flagging threshold
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.0 > threshold
    }
}
