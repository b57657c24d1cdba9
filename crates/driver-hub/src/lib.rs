pub mod config;
pub mod drivers;
pub mod error;
pub mod telemetry;
