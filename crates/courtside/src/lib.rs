pub mod config;
pub mod development;
pub mod error;
pub mod import;
pub mod roster;
pub mod telemetry;
