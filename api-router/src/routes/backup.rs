use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use common::storage::types::document::HubDocument;
use serde_json::json;

use crate::{api_state::ApiState, error::ApiError};

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("hub-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Sends the whole document as a file download named after today's date.
pub async fn download_backup(State(state): State<ApiState>) -> impl IntoResponse {
    let document = state.store.load().await;
    let disposition = format!(
        "attachment; filename={}",
        backup_file_name(Utc::now().date_naive())
    );

    ([(header::CONTENT_DISPOSITION, disposition)], Json(document))
}

pub async fn restore_backup(
    State(state): State<ApiState>,
    Json(document): Json<HubDocument>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .replace(&document)
        .await
        .map_err(|_| ApiError::InternalError("Erro ao restaurar backup".to_string()))?;

    tracing::info!("Backup restored");

    Ok(Json(json!({
        "success": true,
        "message": "Backup restaurado com sucesso!"
    })))
}
