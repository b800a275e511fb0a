//! SQLite storage adapter
//!
//! Two tables: `accounts` (one row per address) and `transactions_history`
//! (append-only). Balances and amounts are stored as integer micro-units.
//!
//! Writers are serialised by SQLite itself. The pool runs in WAL mode with a
//! busy timeout so concurrent transfers queue on the write lock rather than
//! failing.

use super::{AccountStore, BalanceReader, PendingTransfer, TransactionLister, TransferStore};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};
use types::account::Account;
use types::address::Address;
use types::amount::Amount;
use types::errors::{LedgerError, LedgerResult};
use types::transaction::TransactionRecord;

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY,
        address TEXT UNIQUE NOT NULL CHECK(length(address) = 42 AND address LIKE '0x%'),
        balance INTEGER NOT NULL CHECK(balance >= 0)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS transactions_history(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp INTEGER NOT NULL,
        transaction_hash TEXT NOT NULL,
        sender TEXT NOT NULL,
        recipient TEXT NOT NULL,
        amount INTEGER NOT NULL CHECK(amount > 0)
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_history_recent ON transactions_history(timestamp DESC, id DESC)",
];

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub max_connections: u32,
    /// How long a writer waits on the database lock before giving up
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    address: String,
    balance: i64,
}

#[derive(Debug, FromRow)]
struct TransactionRow {
    id: i64,
    timestamp: i64,
    transaction_hash: String,
    sender: String,
    recipient: String,
    amount: i64,
}

impl From<TransactionRow> for TransactionRecord {
    fn from(row: TransactionRow) -> Self {
        TransactionRecord {
            id: row.id,
            timestamp: row.timestamp,
            transaction_hash: row.transaction_hash,
            sender: row.sender,
            recipient: row.recipient,
            amount: Amount::from_micros(row.amount),
        }
    }
}

fn storage_err(op: &'static str) -> impl Fn(sqlx::Error) -> LedgerError {
    move |e| LedgerError::internal(op, e)
}

/// SQLite-backed ledger store. Cheap to clone; clones share one pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and apply the schema.
    pub async fn open(path: impl AsRef<Path>, options: StoreOptions) -> LedgerResult<Self> {
        const OP: &str = "storage.sqlite.open";

        if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LedgerError::internal(OP, e))?;
        }

        let connect = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(options.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .connect_with(connect)
            .await
            .map_err(storage_err(OP))?;

        for statement in SCHEMA {
            sqlx::query(*statement)
                .execute(&pool)
                .await
                .map_err(storage_err(OP))?;
        }

        debug!(path = %path.as_ref().display(), "storage opened");
        Ok(Self { pool })
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl BalanceReader for SqliteStore {
    #[instrument(skip(self), level = "debug")]
    async fn get_balance(&self, address: &str) -> LedgerResult<Amount> {
        let balance: Option<i64> =
            sqlx::query_scalar("SELECT balance FROM accounts WHERE address = ?")
                .bind(address)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_err("storage.sqlite.get_balance"))?;

        balance
            .map(Amount::from_micros)
            .ok_or_else(|| LedgerError::NotFound(address.to_string()))
    }
}

#[async_trait]
impl AccountStore for SqliteStore {
    #[instrument(skip(self), level = "debug")]
    async fn exists(&self, address: &str) -> LedgerResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM accounts WHERE address = ?")
            .bind(address)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err("storage.sqlite.exists"))?;
        Ok(found.is_some())
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_account(&self, address: &str) -> LedgerResult<Option<Account>> {
        const OP: &str = "storage.sqlite.find_account";

        let row: Option<AccountRow> =
            sqlx::query_as("SELECT address, balance FROM accounts WHERE address = ?")
                .bind(address)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_err(OP))?;

        row.map(|row| {
            let address = Address::parse(row.address).map_err(|e| LedgerError::internal(OP, e))?;
            Ok(Account::new(address, Amount::from_micros(row.balance)))
        })
        .transpose()
    }

    #[instrument(skip(self), level = "debug")]
    async fn add_account(&self, address: &str, initial_balance: Amount) -> LedgerResult<()> {
        let address = Address::parse(address)?;
        if initial_balance.is_negative() {
            return Err(LedgerError::InvalidInput(
                "initial balance must not be negative".to_string(),
            ));
        }
        let micros = initial_balance.to_micros()?;

        let result = sqlx::query("INSERT INTO accounts(address, balance) VALUES (?, ?)")
            .bind(address.as_str())
            .bind(micros)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(LedgerError::Conflict(address.to_string()))
            }
            Err(sqlx::Error::Database(db)) if db.is_check_violation() => {
                Err(LedgerError::InvalidInput(db.message().to_string()))
            }
            Err(e) => Err(LedgerError::internal("storage.sqlite.add_account", e)),
        }
    }

    async fn is_empty(&self) -> LedgerResult<bool> {
        let any: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts)")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err("storage.sqlite.is_empty"))?;
        Ok(any == 0)
    }
}

#[async_trait]
impl TransactionLister for SqliteStore {
    #[instrument(skip(self), level = "debug")]
    async fn get_last(&self, limit: u32) -> LedgerResult<Vec<TransactionRecord>> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            "SELECT id, timestamp, transaction_hash, sender, recipient, amount \
             FROM transactions_history ORDER BY timestamp DESC, id DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("storage.sqlite.get_last"))?;

        Ok(rows.into_iter().map(TransactionRecord::from).collect())
    }
}

#[async_trait]
impl TransferStore for SqliteStore {
    #[instrument(skip(self, transfer), level = "debug", fields(from = %transfer.sender, to = %transfer.recipient))]
    async fn apply_transfer(&self, transfer: &PendingTransfer) -> LedgerResult<TransactionRecord> {
        const OP: &str = "storage.sqlite.apply_transfer";

        let micros = transfer.amount.to_micros()?;
        let mut tx = self.pool.begin().await.map_err(storage_err(OP))?;

        // First statement is a write: the guard below runs under the
        // database write lock against the latest committed balance.
        let debited = sqlx::query(
            "UPDATE accounts SET balance = balance - ? WHERE address = ? AND balance >= ?",
        )
        .bind(micros)
        .bind(transfer.sender.as_str())
        .bind(micros)
        .execute(&mut *tx)
        .await
        .map_err(storage_err(OP))?;

        if debited.rows_affected() == 0 {
            let balance: Option<i64> =
                sqlx::query_scalar("SELECT balance FROM accounts WHERE address = ?")
                    .bind(transfer.sender.as_str())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(storage_err(OP))?;
            tx.rollback().await.map_err(storage_err(OP))?;

            return Err(match balance {
                Some(balance) => LedgerError::InsufficientFunds {
                    address: transfer.sender.clone(),
                    balance: Amount::from_micros(balance).to_string(),
                    required: transfer.amount.to_string(),
                },
                None => LedgerError::NotFound(transfer.sender.clone()),
            });
        }

        let credited = sqlx::query(
            "UPDATE accounts SET balance = balance + ? WHERE address = ? AND balance <= ? - ?",
        )
        .bind(micros)
        .bind(transfer.recipient.as_str())
        .bind(i64::MAX)
        .bind(micros)
        .execute(&mut *tx)
        .await
        .map_err(storage_err(OP))?;

        if credited.rows_affected() == 0 {
            let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM accounts WHERE address = ?")
                .bind(transfer.recipient.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(storage_err(OP))?;
            tx.rollback().await.map_err(storage_err(OP))?;

            return Err(match found {
                Some(_) => LedgerError::InvalidInput(format!(
                    "balance of {} would overflow",
                    transfer.recipient
                )),
                None => LedgerError::NotFound(transfer.recipient.clone()),
            });
        }

        // Stamped under the write lock; never behind the newest record.
        let newest: Option<i64> =
            sqlx::query_scalar("SELECT MAX(timestamp) FROM transactions_history")
                .fetch_one(&mut *tx)
                .await
                .map_err(storage_err(OP))?;
        let now = Utc::now().timestamp();
        let timestamp = newest.map_or(now, |newest| now.max(newest));
        let transaction_hash = transfer.hash_at(timestamp);

        let inserted = sqlx::query(
            "INSERT INTO transactions_history(timestamp, transaction_hash, sender, recipient, amount) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(timestamp)
        .bind(transaction_hash.as_str())
        .bind(transfer.sender.as_str())
        .bind(transfer.recipient.as_str())
        .bind(micros)
        .execute(&mut *tx)
        .await
        .map_err(storage_err(OP))?;

        tx.commit().await.map_err(storage_err(OP))?;

        Ok(TransactionRecord {
            id: inserted.last_insert_rowid(),
            timestamp,
            transaction_hash,
            sender: transfer.sender.clone(),
            recipient: transfer.recipient.clone(),
            amount: transfer.amount,
        })
    }
}
