//! Types library for the wallet ledger
//!
//! This library provides the core type definitions shared by the ledger
//! service and the HTTP gateway.
//!
//! # Modules
//! - `address`: Wallet addresses (`0x` + 40 hex digits)
//! - `amount`: Fixed-point amounts (six fractional digits)
//! - `account`: Account and balance types
//! - `transaction`: Transaction history records and hashing
//! - `errors`: Error taxonomy

pub mod address;
pub mod amount;
pub mod account;
pub mod transaction;
pub mod errors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::address::*;
    pub use crate::amount::*;
    pub use crate::account::*;
    pub use crate::transaction::*;
    pub use crate::errors::*;
}
