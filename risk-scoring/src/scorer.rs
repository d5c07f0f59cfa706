//! Scorer seam and the heuristic reference scorer

use crate::error::Result;
use crate::features::{Channel, TransactionFeatures};
use crate::score::RiskScore;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Fraud-risk capability
///
/// Given transaction features, produce a probability in [0, 1] or fail.
/// The call may suspend for non-trivial latency (network, model
/// inference); the coordinator wraps it in a timeout.
#[async_trait]
pub trait RiskScorer: Send + Sync {
    /// Score one transfer attempt
    async fn score(&self, features: &TransactionFeatures) -> Result<RiskScore>;
}

/// Deterministic weighted-factor scorer
///
/// Stands in for the production model: accumulates suspicion weights from
/// amount, history, and timing features, clamped into [0, 1]. Useful as a
/// default and as a predictable scorer in embedded deployments.
#[derive(Debug, Default)]
pub struct HeuristicScorer {}

impl HeuristicScorer {
    /// Amount above which a transfer counts as large
    const LARGE_AMOUNT: u64 = 10_000;
    /// Amount above which a transfer counts as very large
    const VERY_LARGE_AMOUNT: u64 = 50_000;
    /// Transfers per day above which the account counts as hyperactive
    const FREQUENT_TRANSFERS: u32 = 10;

    /// Create a new scorer
    pub fn new() -> Self {
        Self {}
    }

    fn assess(&self, features: &TransactionFeatures) -> (f64, Vec<&'static str>) {
        let mut score: f64 = 0.0;
        let mut factors = Vec::new();

        if features.amount > Decimal::from(Self::LARGE_AMOUNT) {
            score += 0.2;
            factors.push("large amount");
        }

        if features.amount > Decimal::from(Self::VERY_LARGE_AMOUNT) {
            score += 0.25;
            factors.push("very large amount");
        }

        if features.average_amount > Decimal::ZERO
            && features.amount > features.average_amount * Decimal::from(5)
        {
            score += 0.3;
            factors.push("amount far above account average");
        }

        if features.count_24h > Self::FREQUENT_TRANSFERS {
            score += 0.25;
            factors.push("frequent transfers in 24h");
        }

        if features.hour_of_day() < 6 {
            score += 0.15;
            factors.push("odd-hour transfer");
        }

        if features.channel == Channel::Atm {
            score += 0.1;
            factors.push("ATM channel");
        }

        (score.min(1.0), factors)
    }
}

#[async_trait]
impl RiskScorer for HeuristicScorer {
    async fn score(&self, features: &TransactionFeatures) -> Result<RiskScore> {
        let (score, factors) = self.assess(features);
        tracing::debug!(
            source = %features.source,
            amount = %features.amount,
            score,
            ?factors,
            "transfer scored"
        );
        Ok(RiskScore::new(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ledger_store::AccountId;

    fn features(amount: u64, hour: u32, count_24h: u32, average: u64) -> TransactionFeatures {
        TransactionFeatures {
            amount: Decimal::from(amount),
            timestamp: Utc.with_ymd_and_hms(2024, 7, 3, hour, 0, 0).unwrap(),
            source: AccountId::new(1),
            destination: AccountId::new(2),
            channel: Channel::Online,
            count_24h,
            average_amount: Decimal::from(average),
        }
    }

    #[tokio::test]
    async fn test_ordinary_transfer_scores_low() {
        let scorer = HeuristicScorer::new();
        let score = scorer.score(&features(200, 14, 1, 250)).await.unwrap();
        assert!(!score.exceeds(0.5));
    }

    #[tokio::test]
    async fn test_suspicious_transfer_scores_high() {
        let scorer = HeuristicScorer::new();
        // Very large, far above average, hyperactive account, 3am.
        let score = scorer.score(&features(60_000, 3, 12, 400)).await.unwrap();
        assert!(score.exceeds(0.5));
    }

    #[tokio::test]
    async fn test_scoring_is_deterministic() {
        let scorer = HeuristicScorer::new();
        let f = features(60_000, 3, 12, 400);
        let first = scorer.score(&f).await.unwrap();
        let second = scorer.score(&f).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_score_clamped_to_one() {
        let scorer = HeuristicScorer::new();
        let mut f = features(100_000, 2, 50, 10);
        f.channel = Channel::Atm;
        let score = scorer.score(&f).await.unwrap();
        assert!(score.value() <= 1.0);
    }
}
