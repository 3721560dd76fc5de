use axum::{extract::State, response::IntoResponse, Json};
use common::storage::types::document::HubDocument;
use serde_json::json;

use crate::{api_state::ApiState, error::ApiError};

pub async fn get_data(State(state): State<ApiState>) -> Json<HubDocument> {
    Json(state.store.load().await)
}

/// Replaces the whole document with the request body.
pub async fn save_data(
    State(state): State<ApiState>,
    Json(document): Json<HubDocument>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .replace(&document)
        .await
        .map_err(|_| ApiError::InternalError("Erro ao salvar dados".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Dados salvos com sucesso!"
    })))
}
