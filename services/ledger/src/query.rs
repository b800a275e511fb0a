//! Query service: read-only balance and history lookups
//!
//! Every call re-queries the store; nothing is cached between requests.

use crate::store::{BalanceReader, TransactionLister};
use tracing::instrument;
use types::amount::Amount;
use types::errors::{LedgerError, LedgerResult};
use types::transaction::TransactionRecord;

pub struct QueryService<S> {
    store: S,
}

impl<S: BalanceReader + TransactionLister> QueryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn get_balance(&self, address: &str) -> LedgerResult<Amount> {
        if address.is_empty() {
            return Err(LedgerError::InvalidInput("address is empty".to_string()));
        }
        self.store.get_balance(address).await
    }

    /// Up to `limit` most recent transactions, newest first.
    ///
    /// `limit` must be positive. Fewer stored records than `limit` is fine.
    #[instrument(skip(self), level = "debug")]
    pub async fn get_last(&self, limit: i64) -> LedgerResult<Vec<TransactionRecord>> {
        if limit <= 0 {
            return Err(LedgerError::InvalidInput(format!(
                "count must be greater than 0, got {}",
                limit
            )));
        }
        let limit = u32::try_from(limit).unwrap_or(u32::MAX);
        self.store.get_last(limit).await
    }
}
