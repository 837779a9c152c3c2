// handlers/health.rs - GET /health handler

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::api::AppState;

/// GET /health - Liveness plus a storage ping. Not behind the access policy.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match state.catalog.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "storage": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "storage": "unavailable"
                })),
            )
        }
    }
}
