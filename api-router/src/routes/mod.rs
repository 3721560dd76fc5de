pub mod backup;
pub mod collections;
pub mod data;
pub mod heartbeat;
