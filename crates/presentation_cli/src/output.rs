//! Plain-text rendering of command results

use std::fmt::Write;

use application::ApplicationError;
use domain::{Coordinate, FareComparison, RouteBounds, RouteOption, polyline};
use integration_directions::PlacePrediction;
use serde::Serialize;

/// The selected route option with its line summary and map bounds
#[derive(Debug, Serialize)]
pub struct SelectedRoute {
    /// 0-based position in the option list
    pub index: usize,
    /// Line names in travel order
    pub lines: String,
    /// Box to fit a map viewport to
    pub bounds: RouteBounds,
    /// Path re-encoded as a polyline, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_path: Option<String>,
}

impl SelectedRoute {
    /// Describe the option at `index`, if there is one
    pub fn from_options(
        options: &[RouteOption],
        index: Option<usize>,
        encode: bool,
    ) -> Option<Self> {
        let index = index?;
        let option = options.get(index)?;
        Some(Self {
            index,
            lines: option.line_summary(),
            bounds: option.bounds(),
            encoded_path: encode.then(|| polyline::encode(option.path())),
        })
    }
}

/// Render route options, one block per option
///
/// The selected option is marked with `*`.
pub fn route_options(options: &[RouteOption], selected: Option<usize>) -> String {
    let mut out = String::new();
    for (index, option) in options.iter().enumerate() {
        let marker = if selected == Some(index) { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker} Option {} - {}",
            index + 1,
            option.duration_text()
        );
        if option.steps().is_empty() {
            let _ = writeln!(out, "    (no transit steps)");
        }
        for step in option.steps() {
            let _ = writeln!(out, "    {step}");
        }
    }
    out
}

/// Render the selected option's summary
pub fn selected_route(selected: &SelectedRoute) -> String {
    let mut out = String::new();
    if selected.lines.is_empty() {
        let _ = writeln!(out, "Selected: Option {}", selected.index + 1);
    } else {
        let _ = writeln!(
            out,
            "Selected: Option {} via {}",
            selected.index + 1,
            selected.lines
        );
    }
    let _ = writeln!(out, "Bounds: {}", selected.bounds);
    if let Some(encoded) = &selected.encoded_path {
        let _ = writeln!(out, "Encoded path: {encoded}");
    }
    out
}

/// Render the service status report
pub fn status(
    directions_available: bool,
    api_key_configured: bool,
    current_location: Option<Coordinate>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Directions API: {}",
        if directions_available { "reachable" } else { "unreachable" }
    );
    let _ = writeln!(
        out,
        "API key: {}",
        if api_key_configured { "configured" } else { "missing" }
    );
    match current_location {
        Some(location) => {
            let _ = writeln!(out, "Current location: {}", location.to_query_value());
        },
        None => {
            let _ = writeln!(out, "Current location: unavailable");
        },
    }
    out
}

/// Render the distance, travel time and per-provider fare table
pub fn fare_table(comparison: &FareComparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Distance: {:.2} km", comparison.estimate.distance_km);
    let _ = writeln!(
        out,
        "Estimated Time: {} min",
        comparison.estimate.estimated_time_min
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<14}{:>8}{:>10}", "Provider", "Fare", "Per KM");
    for quote in &comparison.quotes {
        let _ = writeln!(
            out,
            "{:<14}{:>8}{:>10}",
            quote.provider_name,
            format!("₹{}", quote.rounded_amount()),
            format!("₹{}", quote.per_km_rate)
        );
    }
    if let Some(cheapest) = comparison.cheapest() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Cheapest: {} (₹{})",
            cheapest.provider_name,
            cheapest.rounded_amount()
        );
    }
    out
}

/// Render place predictions, with coordinates where resolved
pub fn predictions(items: &[(PlacePrediction, Option<Coordinate>)]) -> String {
    if items.is_empty() {
        return "No places found\n".to_string();
    }
    let mut out = String::new();
    for (index, (prediction, location)) in items.iter().enumerate() {
        let _ = write!(out, "{}. {}", index + 1, prediction.description);
        if let Some(location) = location {
            let _ = write!(out, " ({})", location.to_query_value());
        }
        let _ = writeln!(out);
    }
    out
}

/// Render an error as its user-facing alert
pub fn error_alert(error: &ApplicationError) -> String {
    let message = error.user_message();
    format!("{}: {}", message.title, message.body)
}

#[cfg(test)]
mod tests {
    use domain::{TransitStep, quote_all};

    use super::*;

    fn option(duration: &str, steps: Vec<TransitStep>) -> RouteOption {
        RouteOption::new(vec![Coordinate::bangalore()], duration, steps).unwrap()
    }

    #[test]
    fn test_route_options_rendering() {
        let options = vec![
            option(
                "35 mins",
                vec![TransitStep {
                    vehicle_type: "BUS".to_string(),
                    line_name: "500D".to_string(),
                    departure_time: "10:05am".to_string(),
                    arrival_time: "10:25am".to_string(),
                }],
            ),
            option("42 mins", vec![]),
        ];

        let text = route_options(&options, Some(0));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "* Option 1 - 35 mins");
        assert_eq!(
            lines[1],
            "    BUS - 500D (Departs: 10:05am, Arrives: 10:25am)"
        );
        assert_eq!(lines[2], "  Option 2 - 42 mins");
        assert_eq!(lines[3], "    (no transit steps)");
    }

    #[test]
    fn test_selected_route_rendering() {
        let options = vec![option(
            "35 mins",
            vec![
                TransitStep {
                    vehicle_type: "BUS".to_string(),
                    line_name: "500D".to_string(),
                    departure_time: "10:05am".to_string(),
                    arrival_time: "10:25am".to_string(),
                },
                TransitStep {
                    vehicle_type: "SUBWAY".to_string(),
                    line_name: "Purple Line".to_string(),
                    departure_time: "10:30am".to_string(),
                    arrival_time: "10:40am".to_string(),
                },
            ],
        )];

        let selected = SelectedRoute::from_options(&options, Some(0), true).unwrap();
        assert_eq!(
            selected_route(&selected),
            "Selected: Option 1 via 500D → Purple Line\n\
             Bounds: 12.9716,77.5946 to 12.9716,77.5946\n\
             Encoded path: oodnAgerxM\n"
        );
    }

    #[test]
    fn test_selected_route_without_encoding() {
        let options = vec![option("42 mins", vec![])];
        let selected = SelectedRoute::from_options(&options, Some(0), false).unwrap();
        assert_eq!(
            selected_route(&selected),
            "Selected: Option 1\nBounds: 12.9716,77.5946 to 12.9716,77.5946\n"
        );
        assert!(SelectedRoute::from_options(&options, Some(1), false).is_none());
        assert!(SelectedRoute::from_options(&options, None, false).is_none());
    }

    #[test]
    fn test_status_rendering() {
        assert_eq!(
            status(true, false, Some(Coordinate::bangalore())),
            "Directions API: reachable\n\
             API key: missing\n\
             Current location: 12.9716,77.5946\n"
        );
        assert!(status(false, true, None).contains("Current location: unavailable"));
    }

    #[test]
    fn test_fare_table_rendering() {
        let comparison = quote_all(&Coordinate::bangalore(), &Coordinate::koramangala());
        let text = fare_table(&comparison);

        assert!(text.starts_with("Distance: 4.59 km\nEstimated Time: 9 min\n"));
        assert!(text.contains("UBER"));
        assert!(text.contains("₹119"));
        assert!(text.contains("NAMMA YATRI"));
        assert!(text.contains("₹11.5"));
        assert!(text.ends_with("Cheapest: RAPIDO (₹85)\n"));
    }

    #[test]
    fn test_predictions_rendering() {
        let items = vec![
            (
                PlacePrediction {
                    place_id: "a".to_string(),
                    description: "Koramangala, Bengaluru".to_string(),
                },
                Some(Coordinate::koramangala()),
            ),
            (
                PlacePrediction {
                    place_id: "b".to_string(),
                    description: "Koramangala 5th Block".to_string(),
                },
                None,
            ),
        ];
        let text = predictions(&items);
        assert_eq!(
            text,
            "1. Koramangala, Bengaluru (12.9352,77.6146)\n2. Koramangala 5th Block\n"
        );
    }

    #[test]
    fn test_no_predictions() {
        assert_eq!(predictions(&[]), "No places found\n");
    }

    #[test]
    fn test_error_alerts_are_distinct() {
        assert_eq!(
            error_alert(&ApplicationError::NoRouteFound),
            "No Routes Found: No Public Transports Found"
        );
        assert_eq!(
            error_alert(&ApplicationError::FetchError("HTTP 500".to_string())),
            "Error: Error fetching route details"
        );
        assert_eq!(
            error_alert(&ApplicationError::PermissionDenied("off".to_string())),
            "Permission Denied: Permission to access location was denied"
        );
    }
}
