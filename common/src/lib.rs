pub mod error;
pub mod middleware_heartbeat;
pub mod storage;
pub mod utils;
