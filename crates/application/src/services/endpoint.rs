//! Trip endpoints
//!
//! An endpoint is either a fixed coordinate or the user's current position,
//! resolved through a [`LocationPort`] at request time.

use std::fmt;
use std::str::FromStr;

use domain::{Coordinate, DomainError};

use crate::error::ApplicationError;
use crate::ports::LocationPort;

/// Keyword selecting the current position
const CURRENT: &str = "current";

/// Origin or destination of a trip
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    /// The user's current position
    CurrentLocation,
    /// A fixed coordinate
    Fixed(Coordinate),
}

impl Endpoint {
    /// Resolve to a coordinate
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::PermissionDenied`] if the current position is
    /// requested without a location source or the source refuses access.
    pub async fn resolve(
        &self,
        location: Option<&dyn LocationPort>,
    ) -> Result<Coordinate, ApplicationError> {
        match self {
            Self::Fixed(coordinate) => Ok(*coordinate),
            Self::CurrentLocation => match location {
                Some(port) => port.current_location().await,
                None => Err(ApplicationError::PermissionDenied(
                    "no location source configured".to_string(),
                )),
            },
        }
    }
}

impl From<Coordinate> for Endpoint {
    fn from(coordinate: Coordinate) -> Self {
        Self::Fixed(coordinate)
    }
}

impl FromStr for Endpoint {
    type Err = DomainError;

    /// Parse `current` or a `lat,lng` pair
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(CURRENT) {
            return Ok(Self::CurrentLocation);
        }
        Ok(Self::Fixed(s.parse::<Coordinate>()?))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentLocation => write!(f, "current location"),
            Self::Fixed(coordinate) => write!(f, "{coordinate}"),
        }
    }
}
