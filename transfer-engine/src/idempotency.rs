//! Idempotency cache for transfer requests
//!
//! One cell per idempotency token. The first arrival computes the transfer
//! while holding the cell's mutex; any retry (including a concurrent one)
//! awaits that mutex and replays the stored result, so a retried token
//! yields one effective transfer and one transaction record.
//!
//! Entries are retained for the process lifetime; bounding them is the
//! embedding service's concern.

use crate::coordinator::TransferOutcome;
use crate::error::Error;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

pub(crate) type StoredResult = Result<TransferOutcome, Error>;

#[derive(Debug, Default)]
pub(crate) struct IdempotencyCache {
    cells: DashMap<Uuid, Arc<Mutex<Option<StoredResult>>>>,
}

impl IdempotencyCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The cell for a token, creating it on first sight
    pub(crate) fn cell(&self, token: Uuid) -> Arc<Mutex<Option<StoredResult>>> {
        self.cells.entry(token).or_default().clone()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_token_shares_cell() {
        let cache = IdempotencyCache::new();
        let token = Uuid::new_v4();

        let cell_a = cache.cell(token);
        let cell_b = cache.cell(token);
        assert!(Arc::ptr_eq(&cell_a, &cell_b));
        assert_eq!(cache.len(), 1);

        let other = cache.cell(Uuid::new_v4());
        assert!(!Arc::ptr_eq(&cell_a, &other));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_stored_result_replayed() {
        let cache = IdempotencyCache::new();
        let token = Uuid::new_v4();

        {
            let cell = cache.cell(token);
            let mut slot = cell.lock().await;
            *slot = Some(Err(Error::Internal("boom".to_string())));
        }

        let cell = cache.cell(token);
        let slot = cell.lock().await;
        assert_eq!(
            slot.clone(),
            Some(Err(Error::Internal("boom".to_string())))
        );
    }
}
