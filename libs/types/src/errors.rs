//! Error types for the ledger
//!
//! Closed error taxonomy using thiserror. Every storage or service failure
//! is one of these kinds; the HTTP boundary maps each kind to a status.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// Malformed or missing input, non-positive amount or count
    #[error("{0}")]
    InvalidInput(String),

    /// Unknown address
    #[error("{0} is not exists")]
    NotFound(String),

    #[error("not enough balance to send: {address} has {balance}, needs {required}")]
    InsufficientFunds {
        address: String,
        balance: String,
        required: String,
    },

    /// Duplicate address on creation
    #[error("address already exists: {0}")]
    Conflict(String),

    /// Storage or transport failure, with operation context
    #[error("{0}")]
    Internal(String),
}

impl LedgerError {
    /// Wrap a lower-level failure with the name of the operation it came from.
    pub fn internal(op: &str, err: impl std::fmt::Display) -> Self {
        LedgerError::Internal(format!("{}: {}", op, err))
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = LedgerError::NotFound("0xabc".to_string());
        assert_eq!(err.to_string(), "0xabc is not exists");
    }

    #[test]
    fn test_insufficient_funds_display() {
        let err = LedgerError::InsufficientFunds {
            address: "0xabc".to_string(),
            balance: "60".to_string(),
            required: "1000".to_string(),
        };
        assert!(err.to_string().contains("0xabc"));
        assert!(err.to_string().contains("1000"));
    }

    #[test]
    fn test_internal_carries_operation() {
        let err = LedgerError::internal("storage.sqlite.get_balance", "disk I/O error");
        assert_eq!(err.to_string(), "storage.sqlite.get_balance: disk I/O error");
    }
}
