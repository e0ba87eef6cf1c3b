//! Application configuration
//!
//! Layers, from lowest to highest precedence: built-in defaults, an optional
//! `config.toml` in the working directory, and `TRANSIT_FARES_*` environment
//! variables with `__` between nested keys (e.g.
//! `TRANSIT_FARES_GOOGLE__TIMEOUT_SECS=5`). The Google Maps API key may also
//! come from `GOOGLE_MAPS_API_KEY`.

use std::env;

use domain::Coordinate;
use integration_directions::DirectionsConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::TelemetryConfig;

/// Prefix of environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "TRANSIT_FARES";

/// Conventional environment variable holding the Google Maps API key
pub const API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";

const fn default_true() -> bool {
    true
}

/// Geographic location configuration (latitude/longitude pair)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoLocationConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl GeoLocationConfig {
    /// Convert to a domain [`Coordinate`]
    ///
    /// Returns `None` if coordinates are invalid.
    #[must_use]
    pub fn to_coordinate(&self) -> Option<Coordinate> {
        Coordinate::new(self.latitude, self.longitude).ok()
    }
}

/// Source of the user's "current location"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Whether location access is granted
    #[serde(default = "default_true")]
    pub permission_granted: bool,

    /// Position reported as the current location
    #[serde(default)]
    pub current: Option<GeoLocationConfig>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            permission_granted: true,
            current: None,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Google Maps Platform (Directions and Places)
    #[serde(default)]
    pub google: DirectionsConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Current location source
    #[serde(default)]
    pub location: LocationConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut config = Self::load_from("config", ENV_PREFIX)?;
        config.apply_api_key_fallback(env::var(API_KEY_ENV_VAR).ok());
        Ok(config)
    }

    /// Load from a config file base name (extension optional) and env prefix
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load_from(file_name: &str, env_prefix: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("google.base_url", "https://maps.googleapis.com")?
            .set_default("telemetry.log_filter", "warn")?
            // Load from file if exists
            .add_source(config::File::with_name(file_name).required(false))
            // Override with environment variables (e.g., TRANSIT_FARES_GOOGLE__LANGUAGE)
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Use `value` as the API key unless one is already configured
    pub fn apply_api_key_fallback(&mut self, value: Option<String>) {
        if self.google.api_key().is_some() {
            return;
        }
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            debug!("Using API key from {API_KEY_ENV_VAR}");
            self.google.api_key = Some(SecretString::from(key));
        }
    }

    /// Validate all sections
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.google
            .validate()
            .map_err(|e| format!("google: {e}"))?;

        if let Some(current) = &self.location.current {
            if current.to_coordinate().is_none() {
                return Err("location.current: coordinates out of range".to_string());
            }
        }

        Ok(())
    }
}
