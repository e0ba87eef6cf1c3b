//! Directions adapter - Implements DirectionsPort using integration_directions

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::DirectionsPort;
use async_trait::async_trait;
use domain::{Coordinate, RouteOption};
use integration_directions::{DirectionsClient, DirectionsError};
use tracing::{debug, instrument, warn};

/// Adapter for transit directions backed by a [`DirectionsClient`]
pub struct DirectionsAdapter {
    client: Arc<dyn DirectionsClient>,
}

impl std::fmt::Debug for DirectionsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionsAdapter")
            .field("client", &"dyn DirectionsClient")
            .finish()
    }
}

impl DirectionsAdapter {
    /// Create a new directions adapter
    #[must_use]
    pub fn new(client: Arc<dyn DirectionsClient>) -> Self {
        Self { client }
    }

    /// Map an integration error onto the application error taxonomy
    fn map_error(error: DirectionsError) -> ApplicationError {
        match error {
            DirectionsError::NoRouteFound { .. } => ApplicationError::NoRouteFound,
            DirectionsError::MalformedPolyline { .. } => {
                ApplicationError::MalformedPolyline(error.to_string())
            },
            DirectionsError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::FetchError(other.to_string()),
        }
    }
}

#[async_trait]
impl DirectionsPort for DirectionsAdapter {
    #[instrument(
        skip(self, origin, destination),
        fields(origin = %origin, destination = %destination)
    )]
    async fn fetch_routes(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Vec<RouteOption>, ApplicationError> {
        match self.client.fetch_routes(origin, destination).await {
            Ok(options) => {
                debug!(count = options.len(), "Directions fetched");
                Ok(options)
            },
            Err(e) => {
                if e.is_retryable() {
                    warn!(error = %e, "Transient directions failure");
                }
                Err(Self::map_error(e))
            },
        }
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
