use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::utils::heartbeat::HeartbeatMonitor;

/// Counts the request as a sign of life from the browser before handling it.
pub async fn refresh_heartbeat(
    State(monitor): State<Arc<HeartbeatMonitor>>,
    request: Request,
    next: Next,
) -> Response {
    monitor.touch();
    next.run(request).await
}
