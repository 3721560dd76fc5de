use api_state::ApiState;
use axum::{
    extract::{DefaultBodyLimit, FromRef, Path, State},
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Json, Router,
};
use common::{
    middleware_heartbeat::refresh_heartbeat,
    storage::types::{collection::Collection, document::Record},
};
use routes::{
    backup::{download_backup, restore_backup},
    collections::{create_item, delete_item, list_items, update_item},
    data::{get_data, save_data},
    heartbeat::heartbeat,
};
use serde_json::{Map, Value};

pub mod api_state;
pub mod error;
mod routes;

/// Router for the hub API, meant to be nested under `/api`
pub fn api_routes<S>(app_state: &ApiState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    ApiState: FromRef<S>,
{
    // Requests the open browser tab makes; each one keeps the server alive
    let liveness = Router::new()
        .route("/heartbeat", get(heartbeat))
        .route("/data", get(get_data).post(save_data))
        .route_layer(from_fn_with_state(
            app_state.heartbeat.clone(),
            refresh_heartbeat,
        ));

    let records = Router::new()
        .merge(collection_routes("afazeres", Collection::Afazeres, true))
        .merge(collection_routes("checklist", Collection::Checklist, true))
        .merge(collection_routes("checkstatus", Collection::CheckStatus, false))
        .merge(collection_routes("metas", Collection::Metas, true))
        .merge(collection_routes("financeiro", Collection::Financeiro, false))
        .route("/backup", get(download_backup))
        .route("/restore", post(restore_backup));

    liveness
        .merge(records)
        .layer(DefaultBodyLimit::max(app_state.config.max_body_bytes))
}

/// `GET`/`POST` on `/{path}` plus `DELETE` (and optionally `PUT`) on `/{path}/{key}`.
fn collection_routes<S>(path: &str, collection: Collection, updatable: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    ApiState: FromRef<S>,
{
    let list = get(move |State(state): State<ApiState>| list_items(state, collection)).post(
        move |State(state): State<ApiState>, Json(item): Json<Record>| {
            create_item(state, collection, item)
        },
    );

    let mut item = delete(
        move |State(state): State<ApiState>, Path(key): Path<String>| {
            delete_item(state, collection, key)
        },
    );
    if updatable {
        item = item.put(
            move |State(state): State<ApiState>,
                  Path(key): Path<String>,
                  Json(patch): Json<Map<String, Value>>| {
                update_item(state, collection, key, patch)
            },
        );
    }

    Router::new()
        .route(&format!("/{path}"), list)
        .route(&format!("/{path}/{{key}}"), item)
}
