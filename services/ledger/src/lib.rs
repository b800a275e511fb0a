//! Ledger Service
//!
//! Balance store, atomic transfers and read-only queries for the wallet
//! ledger.
//!
//! # Architecture
//!
//! ```text
//!   LedgerService        QueryService
//!        │                    │
//!  TransferStore    BalanceReader + TransactionLister
//!        └─────────┬──────────┘
//!             SqliteStore
//!        (accounts, transactions_history)
//! ```
//!
//! Seeding of demo accounts on an empty store lives in [`seed`].

pub mod store;
pub mod service;
pub mod query;
pub mod seed;

pub use query::QueryService;
pub use service::LedgerService;
pub use store::{SqliteStore, StoreOptions};
