use crate::error::AppError;
use crate::handlers::{self, send, transactions, wallet};
use crate::state::AppState;
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::any::Any;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let api_routes = Router::new()
        .route("/wallet/{address}/balance", get(wallet::get_balance))
        .route("/send", post(send::send))
        .route("/transactions", get(transactions::get_last))
        .method_not_allowed_fallback(handlers::method_not_allowed);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());
    AppError::InternalError(format!("handler panicked: {detail}")).into_response()
}
