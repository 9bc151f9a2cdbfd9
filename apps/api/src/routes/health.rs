use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Lightweight readiness probe.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "detail": "Resume analyzer is running."
    }))
}
