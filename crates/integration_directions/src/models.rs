//! Directions API response models
//!
//! Typed mirror of the subset of the Google Directions JSON response that the
//! route normalizer consumes. Fields the normalizer cannot do without are
//! required, so a response missing them fails to parse with a named error
//! instead of yielding half-empty routes.

use serde::{Deserialize, Serialize};

/// Status value of a successful directions response
pub const STATUS_OK: &str = "OK";

/// Travel mode of steps that ride public transit
pub const TRAVEL_MODE_TRANSIT: &str = "TRANSIT";

/// Top-level directions response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectionsResponse {
    /// "OK", "ZERO_RESULTS", "NOT_FOUND", "REQUEST_DENIED", ...
    pub status: String,
    /// Candidate routes in provider order (absent on most failures)
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
    /// Human-readable detail accompanying a non-OK status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DirectionsResponse {
    /// Whether the provider reported success
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// One candidate route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectionsRoute {
    /// Simplified geometry of the whole route
    pub overview_polyline: OverviewPolyline,
    /// Legs between origin, waypoints and destination
    pub legs: Vec<DirectionsLeg>,
    /// Short route description, e.g. "Outer Ring Rd"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Encoded overview geometry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverviewPolyline {
    /// Encoded polyline string
    pub points: String,
}

/// A leg of a route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectionsLeg {
    /// Total leg duration
    pub duration: TextValue,
    /// Total leg distance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<TextValue>,
    /// Ordered steps (walking, transit, ...)
    #[serde(default)]
    pub steps: Vec<DirectionsStep>,
}

/// A display text with its numeric value (seconds or meters)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextValue {
    /// Display text, e.g. "35 mins"
    pub text: String,
    /// Numeric value in base units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// A single step within a leg
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectionsStep {
    /// "WALKING", "TRANSIT", "DRIVING", ...
    pub travel_mode: String,
    /// Present on transit steps only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_details: Option<TransitDetails>,
}

impl DirectionsStep {
    /// Whether this step rides public transit
    #[must_use]
    pub fn is_transit(&self) -> bool {
        self.travel_mode.eq_ignore_ascii_case(TRAVEL_MODE_TRANSIT)
    }
}

/// Transit-specific step details
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransitDetails {
    /// Line being ridden
    pub line: TransitLine,
    /// Departure time at the boarding stop
    pub departure_time: TimeText,
    /// Arrival time at the alighting stop
    pub arrival_time: TimeText,
}

/// Transit line description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitLine {
    /// Short name, e.g. "500D"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Full name, e.g. "Purple Line"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Vehicle operating the line
    pub vehicle: TransitVehicle,
}

impl TransitLine {
    /// Short name, falling back to the full name when absent or empty
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.short_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Vehicle information of a line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitVehicle {
    /// Vehicle type, e.g. "BUS", "SUBWAY", "HEAVY_RAIL"
    #[serde(rename = "type")]
    pub vehicle_type: String,
}

/// A time with its display text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeText {
    /// Display text, e.g. "10:05am"
    pub text: String,
}
