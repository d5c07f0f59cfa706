//! Configuration for the transfer coordinator

use serde::{Deserialize, Serialize};
use tokio::time::Duration;

/// Policy applied when the risk scorer fails or times out
///
/// The policy is always explicit in configuration; the call site never
/// defaults it silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Execute the transfer without a score; the record is marked
    /// `ScoreUnavailable` so review can find unscored transfers
    FailOpen,
    /// Reject the transfer
    FailClosed,
}

/// Risk scorer call configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Timeout for one scorer call (milliseconds)
    pub timeout_ms: u64,

    /// Fallback policy on scorer failure or timeout
    pub fallback: FallbackPolicy,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 2_000,
            fallback: FallbackPolicy::FailOpen,
        }
    }
}

impl ScorerConfig {
    /// Scorer call timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Transfer coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Score above which (strictly) a transfer is withheld for review
    pub flag_threshold: f64,

    /// Scorer call configuration
    pub scorer: ScorerConfig,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            flag_threshold: 0.5,
            scorer: ScorerConfig::default(),
        }
    }
}

impl TransferConfig {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config: {}", e)))?;
        let config: TransferConfig = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = TransferConfig::default();

        if let Ok(threshold) = std::env::var("TRANSFER_FLAG_THRESHOLD") {
            config.flag_threshold = threshold
                .parse()
                .map_err(|e| crate::Error::Config(format!("Bad TRANSFER_FLAG_THRESHOLD: {}", e)))?;
        }

        if let Ok(timeout) = std::env::var("TRANSFER_SCORER_TIMEOUT_MS") {
            config.scorer.timeout_ms = timeout
                .parse()
                .map_err(|e| crate::Error::Config(format!("Bad TRANSFER_SCORER_TIMEOUT_MS: {}", e)))?;
        }

        if let Ok(policy) = std::env::var("TRANSFER_SCORER_FALLBACK") {
            config.scorer.fallback = match policy.as_str() {
                "fail-open" => FallbackPolicy::FailOpen,
                "fail-closed" => FallbackPolicy::FailClosed,
                other => {
                    return Err(crate::Error::Config(format!(
                        "Bad TRANSFER_SCORER_FALLBACK: {}",
                        other
                    )))
                }
            };
        }

        Ok(config)
    }
}
