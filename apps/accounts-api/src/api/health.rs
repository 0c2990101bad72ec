//! Readiness check with a real database round trip.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::state::AppState;

/// Readiness endpoint: healthy only when the database answers.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    match database::postgres::check_health(&state.db).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "not ready", "database": e.to_string() })),
            )
                .into_response()
        }
    }
}
