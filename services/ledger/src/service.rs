//! Ledger service: balance transfers
//!
//! Validates a transfer in a fixed order (first failure wins), then hands it
//! to the store, which commits debit, credit and history as one unit.

use crate::store::{PendingTransfer, TransferStore};
use tracing::{info, instrument, warn};
use types::amount::Amount;
use types::errors::{LedgerError, LedgerResult};

pub struct LedgerService<S> {
    store: S,
}

impl<S: TransferStore> LedgerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Move `amount` from `sender` to `recipient`, returning the transaction hash.
    ///
    /// Checks, in order:
    /// 1. both addresses non-empty (`InvalidInput`)
    /// 2. sender exists (`NotFound`)
    /// 3. recipient exists (`NotFound`)
    /// 4. amount positive and representable (`InvalidInput`)
    /// 5. sender balance covers amount (`InsufficientFunds`)
    ///
    /// Self-transfers are allowed and still produce a history record.
    /// Identical requests are never deduplicated.
    #[instrument(skip_all, fields(from = %sender, to = %recipient, amount = %amount))]
    pub async fn transfer(&self, sender: &str, recipient: &str, amount: Amount) -> LedgerResult<String> {
        if sender.is_empty() || recipient.is_empty() {
            return Err(LedgerError::InvalidInput(
                "field 'from' or 'to' is empty".to_string(),
            ));
        }

        let Some(account) = self.store.find_account(sender).await? else {
            return Err(LedgerError::NotFound(sender.to_string()));
        };

        if !self.store.exists(recipient).await? {
            return Err(LedgerError::NotFound(recipient.to_string()));
        }

        if !amount.is_positive() {
            return Err(LedgerError::InvalidInput(
                "amount must be greater than 0".to_string(),
            ));
        }
        amount.to_micros()?;

        // Fast path only; the store re-checks under the write lock.
        if !account.can_cover(amount) {
            warn!(balance = %account.balance, "insufficient funds");
            return Err(LedgerError::InsufficientFunds {
                address: sender.to_string(),
                balance: account.balance.to_string(),
                required: amount.to_string(),
            });
        }

        let pending = PendingTransfer::new(sender, recipient, amount);
        let record = self.store.apply_transfer(&pending).await?;

        info!(id = record.id, hash = %record.transaction_hash, "transfer committed");
        Ok(record.transaction_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AccountStore, BalanceReader, SqliteStore, StoreOptions, TransactionLister};
    use tempfile::TempDir;
    use types::address::Address;
    use types::transaction::transaction_hash;

    struct Fixture {
        _tmp: TempDir,
        service: LedgerService<SqliteStore>,
        a: String,
        b: String,
    }

    async fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let store = SqliteStore::open(tmp.path().join("ledger.db"), StoreOptions::default())
            .await
            .unwrap();
        let a = Address::random().to_string();
        let b = Address::random().to_string();
        store.add_account(&a, Amount::from(100)).await.unwrap();
        store.add_account(&b, Amount::from(100)).await.unwrap();
        Fixture {
            _tmp: tmp,
            service: LedgerService::new(store),
            a,
            b,
        }
    }

    #[tokio::test]
    async fn test_transfer_returns_hash_of_committed_record() {
        let f = fixture().await;
        let hash = f.service.transfer(&f.a, &f.b, Amount::from(40)).await.unwrap();

        let records = f.service.store().get_last(1).await.unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.transaction_hash, hash);
        assert_eq!(
            hash,
            transaction_hash(&f.a, &f.b, Amount::from(40), record.timestamp)
        );
    }

    #[tokio::test]
    async fn test_empty_address_is_invalid_input() {
        let f = fixture().await;
        let err = f.service.transfer("", &f.b, Amount::from(1)).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));

        let err = f.service.transfer(&f.a, "", Amount::from(1)).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_missing_sender_checked_before_recipient_and_amount() {
        let f = fixture().await;
        let ghost = Address::random().to_string();
        let other_ghost = Address::random().to_string();

        let err = f
            .service
            .transfer(&ghost, &other_ghost, Amount::ZERO)
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::NotFound(ghost));
    }

    #[tokio::test]
    async fn test_missing_recipient_checked_before_amount() {
        let f = fixture().await;
        let ghost = Address::random().to_string();

        let err = f.service.transfer(&f.a, &ghost, Amount::from(-5)).await.unwrap_err();
        assert_eq!(err, LedgerError::NotFound(ghost));
        assert_eq!(f.service.store().get_balance(&f.a).await.unwrap(), Amount::from(100));
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let f = fixture().await;
        for amount in [Amount::ZERO, Amount::from(-1)] {
            let err = f.service.transfer(&f.a, &f.b, amount).await.unwrap_err();
            assert!(matches!(err, LedgerError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn test_excess_precision_rejected() {
        let f = fixture().await;
        let amount: Amount = "0.0000001".parse().unwrap();
        let err = f.service.transfer(&f.a, &f.b, amount).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_insufficient_funds_leaves_state_untouched() {
        let f = fixture().await;
        let err = f.service.transfer(&f.a, &f.b, Amount::from(101)).await.unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(f.service.store().get_balance(&f.a).await.unwrap(), Amount::from(100));
        assert_eq!(f.service.store().get_balance(&f.b).await.unwrap(), Amount::from(100));
        assert!(f.service.store().get_last(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exact_balance_can_be_sent() {
        let f = fixture().await;
        f.service.transfer(&f.a, &f.b, Amount::from(100)).await.unwrap();
        assert_eq!(f.service.store().get_balance(&f.a).await.unwrap(), Amount::ZERO);
        assert_eq!(f.service.store().get_balance(&f.b).await.unwrap(), Amount::from(200));
    }
}
