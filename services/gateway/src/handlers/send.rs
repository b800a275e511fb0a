use crate::error::AppError;
use crate::models::{Envelope, SendRequest, SendResponse};
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

pub async fn send(
    State(state): State<AppState>,
    payload: Result<Json<SendRequest>, JsonRejection>,
) -> Result<Json<SendResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "send body rejected");
        AppError::BadRequest("failed to decode request body".into())
    })?;

    let transaction_hash = state
        .ledger
        .transfer(&request.from, &request.to, request.amount)
        .await?;

    Ok(Json(SendResponse {
        envelope: Envelope::ok(),
        transaction_hash,
    }))
}
