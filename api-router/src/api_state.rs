use std::sync::Arc;

use common::{
    storage::store::DocumentStore,
    utils::{config::AppConfig, heartbeat::HeartbeatMonitor},
};

#[derive(Clone)]
pub struct ApiState {
    pub store: DocumentStore,
    pub heartbeat: Arc<HeartbeatMonitor>,
    pub config: AppConfig,
}

impl ApiState {
    pub fn new(config: &AppConfig, heartbeat: Arc<HeartbeatMonitor>) -> Self {
        Self {
            store: DocumentStore::new(&config.data_file),
            heartbeat,
            config: config.clone(),
        }
    }
}
