use std::{path::PathBuf, sync::Arc};

use common::utils::{config::AppConfig, heartbeat::HeartbeatMonitor};

#[derive(Clone)]
pub struct HtmlState {
    pub frontend_dir: PathBuf,
    pub heartbeat: Arc<HeartbeatMonitor>,
}

impl HtmlState {
    pub fn new(config: &AppConfig, heartbeat: Arc<HeartbeatMonitor>) -> Self {
        Self {
            frontend_dir: PathBuf::from(&config.frontend_dir),
            heartbeat,
        }
    }

    pub fn index_path(&self) -> PathBuf {
        self.frontend_dir.join("index.html")
    }
}
