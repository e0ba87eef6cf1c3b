//! Directions error types

use domain::PolylineError;
use thiserror::Error;

/// Errors that can occur while fetching or normalizing directions
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// Connection to the directions service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the directions service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body is not valid directions JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Provider status was not "OK" or the route list was empty
    #[error("No routes found (status: {status})")]
    NoRouteFound {
        /// Status reported by the provider
        status: String,
    },

    /// A route's overview polyline could not be decoded
    #[error("Route {route_index} has a malformed polyline: {source}")]
    MalformedPolyline {
        /// Position of the route in the provider response
        route_index: usize,
        /// Underlying decoder error
        #[source]
        source: PolylineError,
    },

    /// Response parsed but is missing data required to build a route option
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error (e.g. missing API key)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

/// Describe a transport error without its request URL
///
/// Request URLs carry the API key as a query parameter.
pub(crate) fn redacted(e: reqwest::Error) -> String {
    e.without_url().to_string()
}

impl DirectionsError {
    /// Returns true if a later attempt could succeed
    ///
    /// Callers do not retry automatically; this only classifies the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(DirectionsError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(DirectionsError::RequestFailed("test".to_string()).is_retryable());
        assert!(DirectionsError::Timeout { timeout_secs: 30 }.is_retryable());
        assert!(
            DirectionsError::RateLimitExceeded {
                retry_after_secs: Some(60)
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!DirectionsError::ParseError("test".to_string()).is_retryable());
        assert!(!DirectionsError::InvalidResponse("test".to_string()).is_retryable());
        assert!(!DirectionsError::ConfigurationError("test".to_string()).is_retryable());
        assert!(
            !DirectionsError::NoRouteFound {
                status: "ZERO_RESULTS".to_string(),
            }
            .is_retryable()
        );
        assert!(
            !DirectionsError::MalformedPolyline {
                route_index: 0,
                source: PolylineError::Truncated { position: 3 },
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_error_display() {
        let err = DirectionsError::NoRouteFound {
            status: "ZERO_RESULTS".to_string(),
        };
        assert!(err.to_string().contains("ZERO_RESULTS"));

        let err = DirectionsError::MalformedPolyline {
            route_index: 2,
            source: PolylineError::Truncated { position: 9 },
        };
        assert!(err.to_string().contains("Route 2"));
        assert!(err.to_string().contains("byte 9"));

        let err = DirectionsError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));
    }
}
