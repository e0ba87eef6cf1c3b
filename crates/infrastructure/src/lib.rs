//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and provides
//! configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, GeoLocationConfig, LocationConfig};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
