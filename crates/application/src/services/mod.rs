//! Application services - Use case implementations

mod endpoint;
mod fare_comparison;
mod route_planner;

pub use endpoint::Endpoint;
pub use fare_comparison::FareComparisonService;
pub use route_planner::{RequestToken, RoutePlannerService};
