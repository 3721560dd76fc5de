use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Browser ping. The liveness refresh itself happens in the route layer.
pub async fn heartbeat() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"ok": true})))
}
