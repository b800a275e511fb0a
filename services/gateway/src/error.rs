use crate::models::Envelope;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use types::errors::LedgerError;

/// Central error type for the Gateway application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::InvalidInput(_) => AppError::Unprocessable(message),
            LedgerError::NotFound(_) => AppError::NotFound(message),
            LedgerError::InsufficientFunds { .. } | LedgerError::Conflict(_) => {
                AppError::Conflict(message)
            }
            LedgerError::Internal(_) => AppError::InternalError(message),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::InternalError(detail) => {
                tracing::error!(error = %detail, "request failed");
                "Internal server error".to_string()
            }
            AppError::BadRequest(msg)
            | AppError::Unprocessable(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::MethodNotAllowed(msg) => {
                tracing::info!(status = status.as_u16(), error = %msg, "request rejected");
                msg
            }
        };

        (status, Json(Envelope::error(message))).into_response()
    }
}
