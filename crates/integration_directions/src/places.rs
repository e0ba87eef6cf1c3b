//! Google Places lookup
//!
//! Resolves free-text input to place predictions via Places Autocomplete and a
//! chosen prediction to coordinates via Place Details. Resolved locations are
//! cached by place id.

use std::time::Duration;

use async_trait::async_trait;
use domain::Coordinate;
use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::DirectionsConfig;
use crate::error::redacted;

const AUTOCOMPLETE_PATH: &str = "/maps/api/place/autocomplete/json";
const DETAILS_PATH: &str = "/maps/api/place/details/json";

/// Errors that can occur during place lookup
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Connection to the places service failed
    #[error("Places connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the places service failed
    #[error("Places request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the places response
    #[error("Places parse error: {0}")]
    ParseError(String),

    /// The place id could not be resolved
    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    /// Provider rejected the request (REQUEST_DENIED, OVER_QUERY_LIMIT, ...)
    #[error("Places API error {status}: {message}")]
    ApiError {
        /// Provider status
        status: String,
        /// Provider error message, if any
        message: String,
    },

    /// Configuration error (e.g. missing API key)
    #[error("Places configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Places request timed out")]
    Timeout,
}

/// An autocomplete suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacePrediction {
    /// Provider place id, used to resolve coordinates
    pub place_id: String,
    /// Human-readable description, e.g. "Koramangala, Bengaluru, Karnataka, India"
    pub description: String,
}

/// Trait for place lookup clients
#[async_trait]
pub trait PlacesClient: Send + Sync {
    /// Suggest places matching free-text input
    async fn autocomplete(&self, input: &str) -> Result<Vec<PlacePrediction>, PlacesError>;

    /// Resolve a place id to its coordinates
    async fn place_location(&self, place_id: &str) -> Result<Coordinate, PlacesError>;
}

/// Places client backed by the Google Places API, with a TTL cache for details
#[derive(Debug)]
pub struct GooglePlacesClient {
    client: Client,
    config: DirectionsConfig,
    cache: Cache<String, (f64, f64)>,
}

impl GooglePlacesClient {
    /// Create a new Google Places client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &DirectionsConfig) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("transit-fares/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlacesError::ConnectionFailed(redacted(e)))?;

        let cache_ttl = if config.caching_enabled() {
            Duration::from_secs(config.place_cache_ttl_minutes * 60)
        } else {
            Duration::from_secs(1) // Minimal TTL when "disabled"
        };

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            client,
            config: config.clone(),
            cache,
        })
    }

    fn api_key(&self) -> Result<&str, PlacesError> {
        self.config.api_key().ok_or_else(|| {
            PlacesError::ConfigurationError("Google Maps API key is not set".to_string())
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, PlacesError> {
        let url = format!("{}{path}", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(PlacesError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response.json().await.map_err(transport_error)
    }
}

fn transport_error(e: reqwest::Error) -> PlacesError {
    if e.is_timeout() {
        PlacesError::Timeout
    } else if e.is_decode() || e.is_body() {
        PlacesError::ParseError(redacted(e))
    } else {
        PlacesError::ConnectionFailed(redacted(e))
    }
}

/// Map a non-OK provider status to an error
fn status_error(status: String, message: Option<String>) -> PlacesError {
    PlacesError::ApiError {
        status,
        message: message.unwrap_or_default(),
    }
}

#[async_trait]
impl PlacesClient for GooglePlacesClient {
    #[instrument(skip(self))]
    async fn autocomplete(&self, input: &str) -> Result<Vec<PlacePrediction>, PlacesError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let key = self.api_key()?;

        let params = [
            ("input", input),
            ("language", self.config.language.as_str()),
            ("key", key),
        ];

        debug!(%input, "Requesting place predictions");
        let raw: RawAutocompleteResponse = self.get_json(AUTOCOMPLETE_PATH, &params).await?;

        match raw.status.as_str() {
            "OK" => Ok(raw
                .predictions
                .into_iter()
                .map(|p| PlacePrediction {
                    place_id: p.place_id,
                    description: p.description,
                })
                .collect()),
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => {
                warn!(status = %raw.status, "Place autocomplete rejected");
                Err(status_error(raw.status, raw.error_message))
            },
        }
    }

    #[instrument(skip(self))]
    async fn place_location(&self, place_id: &str) -> Result<Coordinate, PlacesError> {
        if let Some((lat, lng)) = self.cache.get(place_id).await {
            debug!(%place_id, "Place details cache hit");
            return Coordinate::new(lat, lng).map_err(|e| PlacesError::ParseError(e.to_string()));
        }
        let key = self.api_key()?;

        let params = [
            ("place_id", place_id),
            ("fields", "geometry"),
            ("key", key),
        ];

        let raw: RawDetailsResponse = self.get_json(DETAILS_PATH, &params).await?;

        match raw.status.as_str() {
            "OK" => {},
            "NOT_FOUND" | "ZERO_RESULTS" | "INVALID_REQUEST" => {
                return Err(PlacesError::PlaceNotFound(place_id.to_string()));
            },
            _ => return Err(status_error(raw.status, raw.error_message)),
        }

        let location = raw
            .result
            .map(|r| r.geometry.location)
            .ok_or_else(|| PlacesError::PlaceNotFound(place_id.to_string()))?;

        let coordinate = Coordinate::new(location.lat, location.lng)
            .map_err(|e| PlacesError::ParseError(e.to_string()))?;

        if self.config.caching_enabled() {
            self.cache
                .insert(place_id.to_string(), (location.lat, location.lng))
                .await;
        }
        debug!(%place_id, %coordinate, "Resolved place");

        Ok(coordinate)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawAutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<RawPrediction>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    place_id: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct RawDetailsResponse {
    status: String,
    result: Option<RawPlaceResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlaceResult {
    geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    location: RawLatLng,
}

#[derive(Debug, Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}
