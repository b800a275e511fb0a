use crate::error::AppError;
use crate::models::{BalanceResponse, Envelope};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};

pub async fn get_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<BalanceResponse>, AppError> {
    if address.is_empty() {
        return Err(AppError::BadRequest("address is empty".into()));
    }

    let balance = state.queries.get_balance(&address).await?;

    Ok(Json(BalanceResponse {
        envelope: Envelope::ok(),
        balance,
    }))
}
