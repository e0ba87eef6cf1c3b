//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;

pub use coordinate::{Coordinate, EARTH_RADIUS_KM, InvalidCoordinates};
