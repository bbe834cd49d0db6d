pub mod config;
pub mod memory;
pub mod sheets;
pub mod telemetry;
