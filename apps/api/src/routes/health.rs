use axum::Json;
use serde_json::{json, Value};

/// GET / and GET /health
/// Liveness payload.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "AI Resume Analyzer API is running"
    }))
}
