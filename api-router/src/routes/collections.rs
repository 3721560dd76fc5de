//! Uniform list/append/merge/remove handlers shared by every record collection.

use axum::{response::IntoResponse, Json};
use common::{
    error::AppError,
    storage::types::{collection::Collection, document::Record},
};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::{api_state::ApiState, error::ApiError};

pub async fn list_items(state: ApiState, collection: Collection) -> Json<Vec<Record>> {
    let mut document = state.store.load().await;
    Json(std::mem::take(document.items_mut(collection)))
}

pub async fn create_item(
    state: ApiState,
    collection: Collection,
    item: Record,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .update(|document| {
            document.push_item(collection, item.clone());
            Ok(())
        })
        .await?;

    Ok(Json(json!({ "success": true, "data": item })))
}

pub async fn update_item(
    state: ApiState,
    collection: Collection,
    key: String,
    patch: Map<String, Value>,
) -> Result<impl IntoResponse, ApiError> {
    let merged = state
        .store
        .update(|document| {
            document
                .merge_item(collection, &key, patch)
                .cloned()
                .ok_or_else(|| AppError::NotFound("Não encontrado".to_string()))
        })
        .await
        .inspect_err(|err| {
            if matches!(err, AppError::NotFound(_)) {
                debug!(%collection, %key, "No record to update");
            }
        })?;

    Ok(Json(json!({ "success": true, "data": merged })))
}

/// Removes every record with the key. Missing keys are not an error.
pub async fn delete_item(
    state: ApiState,
    collection: Collection,
    key: String,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state
        .store
        .update(|document| Ok(document.remove_items(collection, &key)))
        .await?;
    debug!(%collection, %key, removed, "Records deleted");

    Ok(Json(json!({ "success": true })))
}
