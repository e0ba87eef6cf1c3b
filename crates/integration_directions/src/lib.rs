//! Google Maps Platform integration for transit route planning
//!
//! Fetches public transit routes from the
//! [Directions API](https://developers.google.com/maps/documentation/directions)
//! and normalizes them into display-ready [`domain::RouteOption`]s. Place
//! autocomplete and place details come from the Places API.
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern of the other integration crates.
//! [`DirectionsClient`] defines the interface for route lookup, implemented by
//! [`GoogleDirectionsClient`]. Response shaping lives in [`normalizer`] so it can
//! be exercised without a network. [`PlacesClient`] resolves free-text input to
//! coordinates via [`GooglePlacesClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::Coordinate;
//! use integration_directions::{DirectionsClient, DirectionsConfig, GoogleDirectionsClient};
//!
//! let config = DirectionsConfig::default().with_api_key("...");
//! let client = GoogleDirectionsClient::new(&config)?;
//!
//! let options = client
//!     .fetch_routes(&Coordinate::bangalore(), &Coordinate::koramangala())
//!     .await?;
//! ```

mod client;
mod config;
mod error;
pub mod models;
pub mod normalizer;
mod places;

pub use client::{DirectionsClient, GoogleDirectionsClient};
pub use config::DirectionsConfig;
pub use error::DirectionsError;
pub use normalizer::{normalize, parse_response};
pub use places::{GooglePlacesClient, PlacePrediction, PlacesClient, PlacesError};
