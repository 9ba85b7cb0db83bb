use crate::startup::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use service_core::error::AppError;

/// Reject every request with 503 unless the store connection is ready.
pub async fn availability_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let connection = state.store.connection_state();
    if !connection.is_ready() {
        tracing::debug!(state = %connection, path = %req.uri().path(), "Store not ready, rejecting request");
        return AppError::ServiceUnavailable.into_response();
    }

    next.run(req).await
}
