//! Google Maps Platform client configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration shared by the Directions and Places clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionsConfig {
    /// Base URL of the Google Maps Platform web services
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as the `key` query parameter
    ///
    /// Without a key every remote call fails with a configuration error;
    /// fare estimation does not need it.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ask the provider for alternative routes
    #[serde(default = "default_alternatives")]
    pub alternatives: bool,

    /// Language for display texts (durations, place descriptions)
    #[serde(default = "default_language")]
    pub language: String,

    /// Place detail cache TTL in minutes (0 to disable caching)
    #[serde(default = "default_place_cache_ttl_minutes")]
    pub place_cache_ttl_minutes: u64,
}

fn default_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_alternatives() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

const fn default_place_cache_ttl_minutes() -> u64 {
    60
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            alternatives: default_alternatives(),
            language: default_language(),
            place_cache_ttl_minutes: default_place_cache_ttl_minutes(),
        }
    }
}

impl DirectionsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some(SecretString::from("test-key")),
            timeout_secs: 5,
            place_cache_ttl_minutes: 0,
            ..Default::default()
        }
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Check if place caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.place_cache_ttl_minutes > 0
    }

    /// The API key, if configured and non-empty
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|key| !key.trim().is_empty())
    }

    /// Validate the configuration
    ///
    /// A missing API key is not an error here; it degrades remote calls only.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.language.is_empty() {
            return Err("language must not be empty".to_string());
        }

        Ok(())
    }
}
