pub mod send;
pub mod transactions;
pub mod wallet;

use crate::error::AppError;
use crate::models::Envelope;
use axum::Json;

pub async fn health() -> Json<Envelope> {
    Json(Envelope::ok())
}

pub async fn not_found() -> AppError {
    AppError::NotFound("route not found".into())
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("method not allowed".into())
}
