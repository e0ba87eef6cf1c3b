//! Route normalization
//!
//! Turns a directions response into display-ready [`RouteOption`]s: decoded
//! path, duration text of the first leg and its transit steps in travel order.
//! Only the first leg of every route is considered.

use domain::{RouteOption, TransitStep, polyline};
use tracing::debug;

use crate::error::DirectionsError;
use crate::models::{DirectionsResponse, DirectionsRoute, DirectionsStep};

/// Parse a raw directions response body
///
/// # Errors
///
/// Returns [`DirectionsError::ParseError`] if the body is not JSON or lacks a
/// field the normalizer requires.
pub fn parse_response(body: &str) -> Result<DirectionsResponse, DirectionsError> {
    serde_json::from_str(body).map_err(|e| DirectionsError::ParseError(e.to_string()))
}

/// Normalize a directions response into route options, in provider order
///
/// The first option is the default selection.
///
/// # Errors
///
/// - [`DirectionsError::NoRouteFound`] if the status is not "OK" or there are no routes
/// - [`DirectionsError::MalformedPolyline`] if an overview polyline cannot be decoded
/// - [`DirectionsError::InvalidResponse`] if a route lacks a leg, decodes to an
///   empty path, or has a transit step without line details
pub fn normalize(response: DirectionsResponse) -> Result<Vec<RouteOption>, DirectionsError> {
    if !response.is_ok() || response.routes.is_empty() {
        return Err(DirectionsError::NoRouteFound {
            status: response.status,
        });
    }

    let options = response
        .routes
        .into_iter()
        .enumerate()
        .map(|(index, route)| normalize_route(index, route))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = options.len(), "Normalized route options");
    Ok(options)
}

fn normalize_route(
    route_index: usize,
    route: DirectionsRoute,
) -> Result<RouteOption, DirectionsError> {
    let path = polyline::decode(&route.overview_polyline.points).map_err(|source| {
        DirectionsError::MalformedPolyline {
            route_index,
            source,
        }
    })?;

    let Some(leg) = route.legs.into_iter().next() else {
        return Err(DirectionsError::InvalidResponse(format!(
            "route {route_index} has no legs"
        )));
    };

    let steps = leg
        .steps
        .iter()
        .enumerate()
        .filter(|(_, step)| step.is_transit())
        .map(|(step_index, step)| transit_step(route_index, step_index, step))
        .collect::<Result<Vec<_>, _>>()?;

    RouteOption::new(path, leg.duration.text, steps).map_err(|e| {
        DirectionsError::InvalidResponse(format!("route {route_index}: {e}"))
    })
}

fn transit_step(
    route_index: usize,
    step_index: usize,
    step: &DirectionsStep,
) -> Result<TransitStep, DirectionsError> {
    let details = step.transit_details.as_ref().ok_or_else(|| {
        DirectionsError::InvalidResponse(format!(
            "route {route_index} step {step_index} is a transit step without transit_details"
        ))
    })?;

    let line_name = details.line.display_name().ok_or_else(|| {
        DirectionsError::InvalidResponse(format!(
            "route {route_index} step {step_index} has no line name"
        ))
    })?;

    Ok(TransitStep {
        vehicle_type: details.line.vehicle.vehicle_type.clone(),
        line_name: line_name.to_string(),
        departure_time: details.departure_time.text.clone(),
        arrival_time: details.arrival_time.text.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn walk_step() -> serde_json::Value {
        serde_json::json!({ "travel_mode": "WALKING" })
    }

    fn transit_step_json(
        vehicle: &str,
        short_name: &str,
        name: &str,
        dep: &str,
        arr: &str,
    ) -> serde_json::Value {
        serde_json::json!({
            "travel_mode": "TRANSIT",
            "transit_details": {
                "line": {
                    "short_name": short_name,
                    "name": name,
                    "vehicle": { "type": vehicle }
                },
                "departure_time": { "text": dep },
                "arrival_time": { "text": arr }
            }
        })
    }

    fn route_json(
        points: &str,
        duration: &str,
        steps: Vec<serde_json::Value>,
    ) -> serde_json::Value {
        serde_json::json!({
            "overview_polyline": { "points": points },
            "legs": [{
                "duration": { "text": duration, "value": 2100 },
                "steps": steps
            }]
        })
    }

    fn response(status: &str, routes: Vec<serde_json::Value>) -> DirectionsResponse {
        let json = serde_json::json!({ "status": status, "routes": routes });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_keeps_only_transit_steps_in_order() {
        let steps = vec![
            walk_step(),
            transit_step_json("BUS", "500D", "Hebbal - Silk Board", "10:05am", "10:25am"),
            walk_step(),
            transit_step_json("HEAVY_RAIL", "", "Purple Line", "10:32am", "10:50am"),
        ];
        let routes = vec![route_json(REFERENCE_POLYLINE, "45 mins", steps)];
        let options = normalize(response("OK", routes)).unwrap();

        assert_eq!(options.len(), 1);
        let option = &options[0];
        assert_eq!(option.duration_text(), "45 mins");
        assert_eq!(option.path().len(), 3);
        assert_eq!(option.steps().len(), 2);

        assert_eq!(option.steps()[0].vehicle_type, "BUS");
        assert_eq!(option.steps()[0].line_name, "500D");
        assert_eq!(option.steps()[0].departure_time, "10:05am");
        assert_eq!(option.steps()[0].arrival_time, "10:25am");

        assert_eq!(option.steps()[1].vehicle_type, "HEAVY_RAIL");
        assert_eq!(option.steps()[1].line_name, "Purple Line");
    }

    #[test]
    fn test_preserves_route_order() {
        let routes = vec![
            route_json(REFERENCE_POLYLINE, "45 mins", vec![]),
            route_json("??", "50 mins", vec![]),
            route_json("_p~iF~ps|U", "1 hour 5 mins", vec![]),
        ];
        let options = normalize(response("OK", routes)).unwrap();
        let durations: Vec<_> = options.iter().map(RouteOption::duration_text).collect();
        assert_eq!(durations, vec!["45 mins", "50 mins", "1 hour 5 mins"]);
    }

    #[test]
    fn test_decodes_path() {
        let options =
            normalize(response("OK", vec![route_json(REFERENCE_POLYLINE, "1 min", vec![])]))
                .unwrap();
        let first = options[0].path()[0];
        assert!((first.latitude() - 38.5).abs() < f64::EPSILON);
        assert!((first.longitude() + 120.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_results_is_no_route_found() {
        let result = normalize(response("ZERO_RESULTS", vec![]));
        match result {
            Err(DirectionsError::NoRouteFound { status }) => assert_eq!(status, "ZERO_RESULTS"),
            other => unreachable!("Expected NoRouteFound, got {other:?}"),
        }
    }

    #[test]
    fn test_ok_without_routes_is_no_route_found() {
        let result = normalize(response("OK", vec![]));
        assert!(matches!(result, Err(DirectionsError::NoRouteFound { .. })));
    }

    #[test]
    fn test_non_ok_status_with_routes_is_no_route_found() {
        let routes = vec![route_json(REFERENCE_POLYLINE, "45 mins", vec![])];
        let result = normalize(response("REQUEST_DENIED", routes));
        assert!(matches!(result, Err(DirectionsError::NoRouteFound { .. })));
    }

    #[test]
    fn test_truncated_polyline_is_malformed() {
        let routes = vec![
            route_json(REFERENCE_POLYLINE, "45 mins", vec![]),
            route_json("_p~iF", "45 mins", vec![]),
        ];
        let result = normalize(response("OK", routes));
        assert!(matches!(
            result,
            Err(DirectionsError::MalformedPolyline { route_index: 1, .. })
        ));
    }

    #[test]
    fn test_empty_polyline_is_invalid() {
        let result = normalize(response("OK", vec![route_json("", "45 mins", vec![])]));
        assert!(matches!(result, Err(DirectionsError::InvalidResponse(_))));
    }

    #[test]
    fn test_route_without_legs_is_invalid() {
        let route = serde_json::json!({
            "overview_polyline": { "points": REFERENCE_POLYLINE },
            "legs": []
        });
        let result = normalize(response("OK", vec![route]));
        match result {
            Err(DirectionsError::InvalidResponse(msg)) => assert!(msg.contains("no legs")),
            other => unreachable!("Expected InvalidResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_transit_step_without_details_is_invalid() {
        let steps = vec![serde_json::json!({ "travel_mode": "TRANSIT" })];
        let routes = vec![route_json(REFERENCE_POLYLINE, "5 mins", steps)];
        let result = normalize(response("OK", routes));
        match result {
            Err(DirectionsError::InvalidResponse(msg)) => {
                assert!(msg.contains("route 0 step 0"));
            },
            other => unreachable!("Expected InvalidResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_transit_step_without_line_name_is_invalid() {
        let steps = vec![transit_step_json("BUS", "", "", "10:05am", "10:25am")];
        let routes = vec![route_json(REFERENCE_POLYLINE, "5 mins", steps)];
        let result = normalize(response("OK", routes));
        assert!(matches!(result, Err(DirectionsError::InvalidResponse(_))));
    }

    #[test]
    fn test_only_first_leg_is_used() {
        let route = serde_json::json!({
            "overview_polyline": { "points": REFERENCE_POLYLINE },
            "legs": [
                { "duration": { "text": "20 mins" }, "steps": [] },
                {
                    "duration": { "text": "99 mins" },
                    "steps": [transit_step_json("BUS", "1", "One", "1pm", "2pm")]
                }
            ]
        });
        let options = normalize(response("OK", vec![route])).unwrap();
        assert_eq!(options[0].duration_text(), "20 mins");
        assert!(options[0].steps().is_empty());
    }

    #[test]
    fn test_parse_response_invalid_json() {
        assert!(matches!(
            parse_response("not json"),
            Err(DirectionsError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_response_missing_required_field() {
        // routes present but without overview_polyline
        let body = r#"{ "status": "OK", "routes": [{ "legs": [] }] }"#;
        match parse_response(body) {
            Err(DirectionsError::ParseError(msg)) => assert!(msg.contains("overview_polyline")),
            other => unreachable!("Expected ParseError, got {other:?}"),
        }
    }
}
