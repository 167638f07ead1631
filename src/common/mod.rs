pub mod config;
pub mod error;
pub mod id;
pub mod money;
pub mod telemetry;
