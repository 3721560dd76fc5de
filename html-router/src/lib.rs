pub mod html_state;
pub mod routes;

use axum::{extract::FromRef, middleware::from_fn_with_state, routing::get, Router};
use common::middleware_heartbeat::refresh_heartbeat;
use html_state::HtmlState;
use routes::index::index_handler;
use tower_http::services::ServeDir;

/// Front-end routes: the entry page plus every static asset under the front-end directory
pub fn html_routes<S>(app_state: &HtmlState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    HtmlState: FromRef<S>,
{
    tracing::debug!(dir = ?app_state.frontend_dir, "Assets: Serving from filesystem");

    Router::new()
        .route("/", get(index_handler))
        // Opening the page counts as a heartbeat
        .route_layer(from_fn_with_state(
            app_state.heartbeat.clone(),
            refresh_heartbeat,
        ))
        .fallback_service(ServeDir::new(&app_state.frontend_dir))
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use common::utils::{
        config::AppConfig,
        heartbeat::{HeartbeatMonitor, ManualClock},
    };
    use tower::ServiceExt;

    use super::*;

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn root_serves_index_and_refreshes_heartbeat() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("index.html"), "<h1>Hub</h1>").expect("index");
        std::fs::write(dir.path().join("app.js"), "console.log('hub')").expect("asset");

        let config = AppConfig {
            frontend_dir: dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        };
        let clock = Arc::new(ManualClock::new());
        let heartbeat = Arc::new(HeartbeatMonitor::new(clock.clone(), Duration::from_secs(10)));
        let state = HtmlState::new(&config, heartbeat.clone());
        let app: Router = html_routes(&state).with_state(state);

        clock.advance(Duration::from_secs(5));
        let (status, body) = get_page(app.clone(), "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log('hub')");
        assert_eq!(heartbeat.elapsed(), Duration::from_secs(5));

        let (status, body) = get_page(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>Hub</h1>");
        assert_eq!(heartbeat.elapsed(), Duration::ZERO);

        let (status, _) = get_page(app, "/missing.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_index_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            frontend_dir: dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        };
        let state = HtmlState::new(
            &config,
            Arc::new(HeartbeatMonitor::with_system_clock(Duration::from_secs(10))),
        );
        let app: Router = html_routes(&state).with_state(state);

        let (status, _) = get_page(app, "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
