//! Entities produced from directions responses

mod route_option;

pub use route_option::{RouteBounds, RouteOption, TransitStep};
