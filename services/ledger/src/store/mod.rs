//! Storage capabilities
//!
//! Each service depends on the narrowest trait it needs. `SqliteStore`
//! implements all of them.

pub mod sqlite;

use async_trait::async_trait;
use types::account::Account;
use types::amount::Amount;
use types::errors::LedgerResult;
use types::transaction::{transaction_hash, TransactionRecord};

pub use sqlite::{SqliteStore, StoreOptions};

/// Read-only balance lookup
#[async_trait]
pub trait BalanceReader: Send + Sync {
    /// Stored balance of `address`, or `NotFound`.
    async fn get_balance(&self, address: &str) -> LedgerResult<Amount>;
}

/// Address/balance store
#[async_trait]
pub trait AccountStore: BalanceReader {
    /// True iff a row with that address is present. Absence is not an error.
    async fn exists(&self, address: &str) -> LedgerResult<bool>;

    async fn find_account(&self, address: &str) -> LedgerResult<Option<Account>>;

    /// Insert a new account. `Conflict` on duplicate, `InvalidInput` on a
    /// malformed address or negative balance.
    async fn add_account(&self, address: &str, initial_balance: Amount) -> LedgerResult<()>;

    async fn is_empty(&self) -> LedgerResult<bool>;
}

/// Transaction history reader
#[async_trait]
pub trait TransactionLister: Send + Sync {
    /// Up to `limit` most recent records, newest first.
    async fn get_last(&self, limit: u32) -> LedgerResult<Vec<TransactionRecord>>;
}

/// Atomic transfer execution
#[async_trait]
pub trait TransferStore: AccountStore {
    /// Debit, credit and append history in one unit of work.
    ///
    /// The debit is guarded against the committed balance, so a stale read
    /// by the caller can never drive a balance negative. The credit is
    /// guarded against overflow. The record is stamped inside the unit of
    /// work and never earlier than the newest record already stored.
    async fn apply_transfer(&self, transfer: &PendingTransfer) -> LedgerResult<TransactionRecord>;
}

/// A validated transfer waiting to be committed
///
/// Carries no timestamp: the store stamps it once it holds the write lock,
/// so commit order and timestamp order agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransfer {
    pub sender: String,
    pub recipient: String,
    pub amount: Amount,
}

impl PendingTransfer {
    pub fn new(sender: &str, recipient: &str, amount: Amount) -> Self {
        Self {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
        }
    }

    /// Hash of this transfer when committed at `timestamp`.
    pub fn hash_at(&self, timestamp: i64) -> String {
        transaction_hash(&self.sender, &self.recipient, self.amount, timestamp)
    }
}
