//! Transfer coordinator
//!
//! Orchestrates one transfer request end to end: fail-fast validation,
//! ordered lock acquisition, balance re-check, risk evaluation under a
//! timeout, atomic debit+credit, and the audit record. The account locks
//! are the atomicity boundary: they are held from before the balance
//! re-read until the transaction record is appended, so the balance check,
//! the risk decision, and the mutation are atomic with respect to any
//! other transfer touching either account.

use crate::config::{FallbackPolicy, TransferConfig};
use crate::error::{Error, Result};
use crate::idempotency::IdempotencyCache;
use chrono::Utc;
use ledger_store::{
    AccountId, LedgerStore, NewTransaction, TransactionLog, UserId,
};
use risk_scoring::{
    ActivityTracker, Channel, RiskScore, RiskScorer, TransactionFeatures,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// Reason recorded on transfers withheld for review
const FLAG_REASON_HIGH_RISK: &str = "High Fraud Risk";

/// One transfer request
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Source account (must be owned by `requesting_user`)
    pub source: AccountId,

    /// Destination account
    pub destination: AccountId,

    /// Amount to move (must be positive)
    pub amount: Decimal,

    /// Resolved identity of the requester
    pub requesting_user: UserId,

    /// Client-supplied token collapsing duplicate retries
    pub idempotency_key: Uuid,

    /// Channel the transfer was initiated through
    pub channel: Channel,
}

/// Non-error outcome of a transfer
#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    /// Funds moved; score present unless the fail-open fallback ran
    Completed {
        /// Audit record id
        transaction_id: Uuid,
        /// Risk score, if scoring ran
        risk_score: Option<RiskScore>,
    },

    /// Withheld pending review; funds remain with the source account
    NeedsReview {
        /// Audit record id
        transaction_id: Uuid,
        /// Score that tripped the threshold
        risk_score: RiskScore,
    },
}

/// Coordinates transfers against an injected store and scorer
#[derive(Debug)]
pub struct TransferCoordinator<S, R> {
    store: Arc<S>,
    scorer: Arc<R>,
    config: TransferConfig,
    activity: ActivityTracker,
    idempotency: IdempotencyCache,
}

impl<S, R> TransferCoordinator<S, R>
where
    S: LedgerStore + TransactionLog,
    R: RiskScorer,
{
    /// Create a coordinator
    pub fn new(store: Arc<S>, scorer: Arc<R>, config: TransferConfig) -> Self {
        Self {
            store,
            scorer,
            config,
            activity: ActivityTracker::default(),
            idempotency: IdempotencyCache::new(),
        }
    }

    /// Execute one transfer request
    ///
    /// A retry bearing a previously seen idempotency token returns the
    /// original result without touching any balance; a concurrent duplicate
    /// awaits the in-flight attempt.
    pub async fn transfer(&self, request: TransferRequest) -> Result<TransferOutcome> {
        let cell = self.idempotency.cell(request.idempotency_key);
        let mut slot = cell.lock().await;

        if let Some(previous) = slot.as_ref() {
            tracing::debug!(
                token = %request.idempotency_key,
                "replaying stored result for retried transfer"
            );
            return previous.clone();
        }

        let result = self.execute(&request).await;
        *slot = Some(result.clone());
        result
    }

    /// Fail-fast validation; runs without any lock held
    async fn validate(&self, request: &TransferRequest) -> Result<()> {
        if request.amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(request.amount));
        }

        if request.source == request.destination {
            return Err(Error::SelfTransfer(request.source));
        }

        let source = self.store.get_account(request.source).await?;
        self.store.get_account(request.destination).await?;

        if source.user_id != request.requesting_user {
            return Err(Error::Unauthorized {
                user: request.requesting_user,
                account: request.source,
            });
        }

        Ok(())
    }

    async fn execute(&self, request: &TransferRequest) -> Result<TransferOutcome> {
        self.validate(request).await?;

        let _locks = self
            .store
            .lock_accounts(request.source, request.destination)
            .await;

        // Balances may have changed since validation ran outside the lock.
        let source = self.store.get_account(request.source).await?;
        if source.balance < request.amount {
            let tx = self
                .store
                .record(NewTransaction::rejected_insufficient_funds(
                    request.source,
                    request.destination,
                    request.amount,
                ))
                .await?;
            tracing::info!(
                transaction = %tx.id,
                source = %request.source,
                amount = %request.amount,
                balance = %source.balance,
                "transfer rejected: insufficient funds"
            );
            return Err(Error::InsufficientFunds {
                account: request.source,
                transaction_id: tx.id,
            });
        }

        let score = self.evaluate_risk(request).await?;

        if let Some(score) = score {
            if score.exceeds(self.config.flag_threshold) {
                let tx = self
                    .store
                    .record(NewTransaction::flagged(
                        request.source,
                        request.destination,
                        request.amount,
                        score.value(),
                        FLAG_REASON_HIGH_RISK,
                    ))
                    .await?;
                tracing::info!(
                    transaction = %tx.id,
                    score = score.value(),
                    "transfer withheld for review"
                );
                return Ok(TransferOutcome::NeedsReview {
                    transaction_id: tx.id,
                    risk_score: score,
                });
            }
        }

        let transaction = self.apply_transfer(request, score).await?;
        self.activity
            .record(request.source, request.amount, Utc::now());

        tracing::info!(
            transaction = %transaction.id,
            source = %request.source,
            destination = %request.destination,
            amount = %request.amount,
            "transfer completed"
        );
        Ok(TransferOutcome::Completed {
            transaction_id: transaction.id,
            risk_score: score,
        })
    }

    /// Call the scorer under the configured timeout
    ///
    /// Returns `Some(score)` when scoring ran, `Ok(None)` when the fail-open
    /// fallback proceeds unscored, and `Err(ScorerUnavailable)` under
    /// fail-closed (the rejection is recorded for audit).
    async fn evaluate_risk(&self, request: &TransferRequest) -> Result<Option<RiskScore>> {
        let features = self.features_for(request);
        let call = self.scorer.score(&features);

        let failure = match tokio::time::timeout(self.config.scorer.timeout(), call).await {
            Ok(Ok(score)) => return Ok(Some(score)),
            Ok(Err(err)) => err.to_string(),
            Err(_) => "risk scorer timed out".to_string(),
        };

        match self.config.scorer.fallback {
            FallbackPolicy::FailOpen => {
                tracing::warn!(%failure, "risk scorer unavailable; proceeding unscored (fail-open)");
                Ok(None)
            }
            FallbackPolicy::FailClosed => {
                let tx = self
                    .store
                    .record(NewTransaction::rejected_scorer_unavailable(
                        request.source,
                        request.destination,
                        request.amount,
                    ))
                    .await?;
                tracing::warn!(
                    %failure,
                    transaction = %tx.id,
                    "risk scorer unavailable; transfer rejected (fail-closed)"
                );
                Err(Error::ScorerUnavailable {
                    transaction_id: tx.id,
                })
            }
        }
    }

    fn features_for(&self, request: &TransferRequest) -> TransactionFeatures {
        let now = Utc::now();
        let snapshot = self.activity.snapshot(request.source, now);
        TransactionFeatures {
            amount: request.amount,
            timestamp: now,
            source: request.source,
            destination: request.destination,
            channel: request.channel,
            count_24h: snapshot.count_24h,
            average_amount: snapshot.average_amount,
        }
    }

    /// Debit, credit, and record as one atomic unit under the held locks
    ///
    /// Any failure past the debit compensates before surfacing, so no
    /// partial mutation is ever observable.
    async fn apply_transfer(
        &self,
        request: &TransferRequest,
        score: Option<RiskScore>,
    ) -> Result<ledger_store::Transaction> {
        self.store
            .adjust_balance(request.source, -request.amount)
            .await?;

        if let Err(err) = self
            .store
            .adjust_balance(request.destination, request.amount)
            .await
        {
            self.store
                .adjust_balance(request.source, request.amount)
                .await
                .map_err(|e| {
                    Error::Internal(format!("failed to restore source balance: {}", e))
                })?;
            return Err(Error::Internal(format!("credit failed: {}", err)));
        }

        let new_tx = match score {
            Some(score) => NewTransaction::approved(
                request.source,
                request.destination,
                request.amount,
                score.value(),
            ),
            None => NewTransaction::approved_unscored(
                request.source,
                request.destination,
                request.amount,
            ),
        };

        match self.store.record(new_tx).await {
            Ok(tx) => Ok(tx),
            Err(err) => {
                // Reverse both adjustments so the moved funds never outlive
                // a missing audit record.
                self.store
                    .adjust_balance(request.destination, -request.amount)
                    .await
                    .map_err(|e| {
                        Error::Internal(format!("failed to reverse credit: {}", e))
                    })?;
                self.store
                    .adjust_balance(request.source, request.amount)
                    .await
                    .map_err(|e| {
                        Error::Internal(format!("failed to reverse debit: {}", e))
                    })?;
                Err(Error::Internal(format!("record failed: {}", err)))
            }
        }
    }
}
