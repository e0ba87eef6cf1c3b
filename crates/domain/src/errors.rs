//! Domain-level errors

use thiserror::Error;

use crate::polyline::PolylineError;
use crate::value_objects::InvalidCoordinates;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),

    /// Encoded polyline could not be decoded
    #[error("Malformed polyline: {0}")]
    MalformedPolyline(#[from] PolylineError),

    /// A route option was built without any coordinates
    #[error("Route path must contain at least one coordinate")]
    EmptyRoutePath,

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
