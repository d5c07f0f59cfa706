//! Transaction feature vector handed to the scorer

use chrono::{DateTime, Datelike, Timelike, Utc};
use ledger_store::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Channel the transfer was initiated through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    /// Web banking
    Online,
    /// Mobile app
    Mobile,
    /// In-branch
    Branch,
    /// ATM
    Atm,
}

/// Structured features for one transfer attempt
///
/// Amount, timestamp, the involved accounts, the channel, and the source
/// account's recent history. No wire format is mandated; this is an
/// in-process capability call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionFeatures {
    /// Transfer amount
    pub amount: Decimal,

    /// Attempt timestamp
    pub timestamp: DateTime<Utc>,

    /// Source account
    pub source: AccountId,

    /// Destination account
    pub destination: AccountId,

    /// Initiation channel
    pub channel: Channel,

    /// Source-account transfers in the trailing 24 hours
    pub count_24h: u32,

    /// Source-account average transfer amount over the window
    pub average_amount: Decimal,
}

impl TransactionFeatures {
    /// Hour of day (0-23)
    pub fn hour_of_day(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Day of week (0 = Monday)
    pub fn day_of_week(&self) -> u32 {
        self.timestamp.weekday().num_days_from_monday()
    }
}
