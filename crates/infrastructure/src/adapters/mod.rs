//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod directions_adapter;
mod location_adapter;

pub use directions_adapter::DirectionsAdapter;
pub use location_adapter::ConfiguredLocationAdapter;
