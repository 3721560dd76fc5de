use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::warn;

use crate::html_state::HtmlState;

/// Serves the front-end entry page.
pub async fn index_handler(State(state): State<HtmlState>) -> Response {
    let path = state.index_path();
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            warn!(error = %err, path = %path.display(), "Front-end entry page unavailable");
            (StatusCode::NOT_FOUND, "index.html not found").into_response()
        }
    }
}
