//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
///
/// Liveness only; never touches the database.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: "unchecked".to_string(),
    })
}

/// GET /health/ready
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .is_ok();

    let (status, label) = if reachable {
        (StatusCode::OK, "connected")
    } else {
        tracing::warn!("Readiness check failed: database unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
    };

    (
        status,
        Json(HealthResponse {
            status: if reachable { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: label.to_string(),
        }),
    )
}
