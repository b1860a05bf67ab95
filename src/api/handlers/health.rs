use crate::{types::HealthResponse, AppState};
use axum::{extract::State, http::StatusCode, Json};
use tracing::error;

/// Liveness and database reachability
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Healthy", body = HealthResponse),
        (status = 500, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, database) = match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            error!("Health check failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "unreachable")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: if status.is_success() { "ok" } else { "degraded" }.to_string(),
            database: database.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
