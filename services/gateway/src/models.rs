use serde::{Deserialize, Serialize};
use types::amount::Amount;
use types::transaction::TransactionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

/// Fields carried by every response
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub status: Status,
    #[serde(rename = "errorMsg", skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

impl Envelope {
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            error_msg: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error_msg: Some(msg.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub balance: Amount,
}

/// Missing fields default to empty/zero so they fail validation (422)
/// rather than decoding (400).
#[derive(Debug, Clone, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub amount: Amount,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub transaction_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsQuery {
    pub count: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub transactions_count: usize,
    pub transactions: Vec<TransactionRecord>,
}
