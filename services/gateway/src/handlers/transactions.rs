use crate::error::AppError;
use crate::models::{Envelope, TransactionsQuery, TransactionsResponse};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

pub async fn get_last(
    State(state): State<AppState>,
    query: Result<Query<TransactionsQuery>, QueryRejection>,
) -> Result<Json<TransactionsResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "transactions query rejected");
        AppError::BadRequest("failed to decode query string".into())
    })?;

    let raw = query
        .count
        .filter(|count| !count.is_empty())
        .ok_or_else(|| AppError::BadRequest("count is empty".into()))?;

    let count: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Unprocessable(format!("count '{raw}' is not an integer")))?;

    let transactions = state.queries.get_last(count).await?;

    Ok(Json(TransactionsResponse {
        envelope: Envelope::ok(),
        transactions_count: transactions.len(),
        transactions,
    }))
}
