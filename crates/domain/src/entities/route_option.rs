//! Normalized public transit route options

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::Coordinate;

/// One transit ride within a route (bus, train, metro, ...)
///
/// Walking and other non-transit steps are not represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitStep {
    /// Vehicle type as reported by the provider (e.g. "BUS", "SUBWAY")
    pub vehicle_type: String,
    /// Line short name, or the full line name when no short name exists
    pub line_name: String,
    /// Departure time as display text (e.g. "10:05am")
    pub departure_time: String,
    /// Arrival time as display text
    pub arrival_time: String,
}

impl fmt::Display for TransitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} (Departs: {}, Arrives: {})",
            self.vehicle_type, self.line_name, self.departure_time, self.arrival_time
        )
    }
}

/// Smallest latitude/longitude box enclosing a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteBounds {
    /// Minimum latitude and longitude
    pub south_west: Coordinate,
    /// Maximum latitude and longitude
    pub north_east: Coordinate,
}

impl fmt::Display for RouteBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.south_west.to_query_value(),
            self.north_east.to_query_value()
        )
    }
}

/// A renderable route alternative: decoded path, duration and transit legs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOption {
    path: Vec<Coordinate>,
    duration_text: String,
    steps: Vec<TransitStep>,
}

impl RouteOption {
    /// Create a route option
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyRoutePath`] if `path` has no coordinates.
    pub fn new(
        path: Vec<Coordinate>,
        duration_text: impl Into<String>,
        steps: Vec<TransitStep>,
    ) -> Result<Self, DomainError> {
        if path.is_empty() {
            return Err(DomainError::EmptyRoutePath);
        }
        Ok(Self {
            path,
            duration_text: duration_text.into(),
            steps,
        })
    }

    /// Decoded route geometry, never empty
    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    /// Human-readable total duration (e.g. "35 mins")
    pub fn duration_text(&self) -> &str {
        &self.duration_text
    }

    /// Transit rides in travel order
    pub fn steps(&self) -> &[TransitStep] {
        &self.steps
    }

    /// South-west and north-east corners enclosing the whole path
    ///
    /// Used to fit a map viewport to the route.
    #[must_use]
    pub fn bounds(&self) -> RouteBounds {
        let first = self.path[0];
        let (mut south, mut west) = (first.latitude(), first.longitude());
        let (mut north, mut east) = (south, west);
        for point in &self.path[1..] {
            south = south.min(point.latitude());
            north = north.max(point.latitude());
            west = west.min(point.longitude());
            east = east.max(point.longitude());
        }
        RouteBounds {
            south_west: Coordinate::new_unchecked(south, west),
            north_east: Coordinate::new_unchecked(north, east),
        }
    }

    /// Line names joined in travel order, e.g. "500D → Purple Line"
    #[must_use]
    pub fn line_summary(&self) -> String {
        self.steps
            .iter()
            .map(|s| s.line_name.as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}
