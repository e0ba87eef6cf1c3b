//! Directions service port
//!
//! Defines the interface for fetching public transit route options.
//! Adapters in the infrastructure layer implement this port using a directions API.

use async_trait::async_trait;
use domain::{Coordinate, RouteOption};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for transit route lookup
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectionsPort: Send + Sync {
    /// Fetch normalized route options between two coordinates, in provider order
    ///
    /// Fails with [`ApplicationError::NoRouteFound`] when the provider has no
    /// route, and with [`ApplicationError::FetchError`] on any transport or
    /// response failure.
    async fn fetch_routes(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Vec<RouteOption>, ApplicationError>;

    /// Check if the directions service is available
    async fn is_available(&self) -> bool;
}
