use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
    #[serde(default = "default_heartbeat_timeout_secs")]
    pub heartbeat_timeout_secs: u64,
    #[serde(default = "default_heartbeat_check_interval_secs")]
    pub heartbeat_check_interval_secs: u64,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_http_port() -> u16 {
    3000
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_data_file() -> String {
    "data.json".to_string()
}

fn default_frontend_dir() -> String {
    "frontend".to_string()
}

fn default_heartbeat_timeout_secs() -> u64 {
    10
}

fn default_heartbeat_check_interval_secs() -> u64 {
    5
}

// Matches the JSON body limit the browser client was written against.
fn default_max_body_bytes() -> usize {
    100 * 1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            bind_address: default_bind_address(),
            data_file: default_data_file(),
            frontend_dir: default_frontend_dir(),
            heartbeat_timeout_secs: default_heartbeat_timeout_secs(),
            heartbeat_check_interval_secs: default_heartbeat_check_interval_secs(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl AppConfig {
    pub fn serve_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.http_port)
    }

    pub const fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(self.heartbeat_timeout_secs)
    }

    pub const fn heartbeat_check_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_check_interval_secs)
    }
}

pub fn get_config() -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default())
        .build()?;

    config.try_deserialize()
}
