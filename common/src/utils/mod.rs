pub mod config;
pub mod heartbeat;
