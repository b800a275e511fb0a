//! Transaction history types
//!
//! A record is written once per successful transfer and never mutated.

use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Completed transfer as stored in the history table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Storage-assigned sequence number
    pub id: i64,
    /// Unix seconds at commit time
    pub timestamp: i64,
    pub transaction_hash: String,
    pub sender: String,
    pub recipient: String,
    pub amount: Amount,
}

/// Derive the display hash of a transfer.
///
/// `0x` + hex(SHA-256("{sender} - {recipient} - {amount:.6} - {timestamp}")).
/// Identifier only; it proves nothing about the transfer.
pub fn transaction_hash(sender: &str, recipient: &str, amount: Amount, timestamp: i64) -> String {
    let data = format!(
        "{} - {} - {} - {}",
        sender,
        recipient,
        amount.to_fixed_string(),
        timestamp
    );
    let digest = Sha256::digest(data.as_bytes());
    format!("0x{}", hex::encode(digest))
}
