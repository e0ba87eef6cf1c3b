//! Domain layer for transit route and fare comparison
//!
//! Contains the pure core: coordinates, the encoded polyline codec, normalized
//! route options and the ride-hailing fare estimator. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod fare;
pub mod polyline;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use fare::{
    FareComparison, FareProvider, FareQuote, FareQuoteParameters, TripEstimate,
    estimate_distance, estimate_fare, quote_all,
};
pub use polyline::PolylineError;
pub use value_objects::*;
