//! Google Directions client for public transit routes
//!
//! Issues a transit directions query with alternatives and hands the response
//! to the [normalizer](crate::normalizer).

use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinate, RouteOption};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::DirectionsConfig;
use crate::error::{DirectionsError, redacted};
use crate::normalizer::{normalize, parse_response};

/// Path of the directions endpoint below the configured base URL
const DIRECTIONS_PATH: &str = "/maps/api/directions/json";

/// Trait for directions service clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// Fetch normalized transit route options between two coordinates
    async fn fetch_routes(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Vec<RouteOption>, DirectionsError>;

    /// Check if the directions service is reachable
    async fn is_healthy(&self) -> bool;
}

/// Directions client backed by the Google Directions API
#[derive(Debug)]
pub struct GoogleDirectionsClient {
    client: Client,
    config: DirectionsConfig,
}

impl GoogleDirectionsClient {
    /// Create a new Google Directions client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &DirectionsConfig) -> Result<Self, DirectionsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("transit-fares/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DirectionsError::ConnectionFailed(redacted(e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Build the query parameters of a transit directions request
    fn query_params(
        &self,
        api_key: &str,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("origin", origin.to_query_value()),
            ("destination", destination.to_query_value()),
            ("mode", "transit".to_string()),
            ("alternatives", self.config.alternatives.to_string()),
            ("language", self.config.language.clone()),
            ("key", api_key.to_string()),
        ]
    }

    fn map_transport_error(&self, e: reqwest::Error) -> DirectionsError {
        if e.is_timeout() {
            DirectionsError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else if e.is_decode() || e.is_body() {
            DirectionsError::ParseError(redacted(e))
        } else {
            DirectionsError::ConnectionFailed(redacted(e))
        }
    }
}

#[async_trait]
impl DirectionsClient for GoogleDirectionsClient {
    #[instrument(
        skip(self, origin, destination),
        fields(origin = %origin, destination = %destination)
    )]
    async fn fetch_routes(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Vec<RouteOption>, DirectionsError> {
        let api_key = self.config.api_key().ok_or_else(|| {
            DirectionsError::ConfigurationError("Google Maps API key is not set".to_string())
        })?;

        let url = format!("{}{DIRECTIONS_PATH}", self.config.base_url);
        let params = self.query_params(api_key, origin, destination);

        debug!(%url, "Requesting transit directions");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectionsError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(DirectionsError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let parsed = parse_response(&body)?;
        if !parsed.is_ok() {
            warn!(
                status = %parsed.status,
                error_message = ?parsed.error_message,
                "Directions provider returned no routes"
            );
        }

        let options = normalize(parsed)?;
        debug!(count = options.len(), "Route options fetched");
        Ok(options)
    }

    async fn is_healthy(&self) -> bool {
        // The API answers unauthenticated requests with REQUEST_DENIED, which
        // still proves the endpoint is reachable.
        let url = format!("{}{DIRECTIONS_PATH}", self.config.base_url);
        self.client.get(&url).send().await.is_ok()
    }
}
