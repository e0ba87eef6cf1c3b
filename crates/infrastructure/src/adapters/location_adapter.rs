//! Location adapter - Implements LocationPort from configuration

use application::error::ApplicationError;
use application::ports::LocationPort;
use async_trait::async_trait;
use domain::Coordinate;
use tracing::{debug, warn};

use crate::config::LocationConfig;

/// Reports a configured position as the current location
#[derive(Debug, Clone)]
pub struct ConfiguredLocationAdapter {
    permission_granted: bool,
    current: Option<Coordinate>,
}

impl ConfiguredLocationAdapter {
    /// Create an adapter from the location configuration
    ///
    /// An out-of-range configured position counts as unavailable.
    #[must_use]
    pub fn new(config: &LocationConfig) -> Self {
        Self {
            permission_granted: config.permission_granted,
            current: config.current.and_then(|c| c.to_coordinate()),
        }
    }

    /// Create an adapter that always reports `coordinate`
    #[must_use]
    pub const fn fixed(coordinate: Coordinate) -> Self {
        Self {
            permission_granted: true,
            current: Some(coordinate),
        }
    }
}

#[async_trait]
impl LocationPort for ConfiguredLocationAdapter {
    async fn current_location(&self) -> Result<Coordinate, ApplicationError> {
        if !self.permission_granted {
            warn!("Location access denied by configuration");
            return Err(ApplicationError::PermissionDenied(
                "location access is disabled".to_string(),
            ));
        }

        let coordinate = self.current.ok_or_else(|| {
            ApplicationError::PermissionDenied("no current location configured".to_string())
        })?;
        debug!(%coordinate, "Current location resolved");
        Ok(coordinate)
    }
}
