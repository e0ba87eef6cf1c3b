//! Route planning service
//!
//! Fetches transit route options and keeps the most recent result along with
//! the user's selection. Every request is tagged with a generation number; a
//! response is applied only if no newer request was issued in the meantime, so
//! a slow earlier fetch can never overwrite a later one.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::{Coordinate, RouteOption};
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::DirectionsPort;

/// Identifies one route request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Generation number of this request
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct PlannerState {
    options: Vec<RouteOption>,
    selected: usize,
}

/// Service holding the current route options and selection
pub struct RoutePlannerService {
    directions: Arc<dyn DirectionsPort>,
    generation: AtomicU64,
    state: RwLock<PlannerState>,
}

impl fmt::Debug for RoutePlannerService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutePlannerService")
            .field("generation", &self.generation.load(Ordering::Acquire))
            .field("options", &self.state.read().options.len())
            .finish_non_exhaustive()
    }
}

impl RoutePlannerService {
    /// Create a new route planner
    #[must_use]
    pub fn new(directions: Arc<dyn DirectionsPort>) -> Self {
        Self {
            directions,
            generation: AtomicU64::new(0),
            state: RwLock::new(PlannerState::default()),
        }
    }

    /// Start a new request, clearing the current options
    ///
    /// Any request started earlier becomes stale.
    pub fn begin_request(&self) -> RequestToken {
        let mut state = self.state.write();
        let token = RequestToken(self.generation.fetch_add(1, Ordering::AcqRel) + 1);
        state.options.clear();
        state.selected = 0;
        debug!(generation = token.0, "Route request started");
        token
    }

    /// Whether `token` belongs to the latest request
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.generation.load(Ordering::Acquire) == token.0
    }

    /// Apply the outcome of the request identified by `token`
    ///
    /// On success the options replace the current ones and the first option
    /// becomes selected. On failure the options stay empty.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Superseded`] if a newer request was started,
    /// leaving the state untouched; otherwise passes `result`'s error through.
    pub fn complete(
        &self,
        token: RequestToken,
        result: Result<Vec<RouteOption>, ApplicationError>,
    ) -> Result<Vec<RouteOption>, ApplicationError> {
        let mut state = self.state.write();
        if !self.is_current(token) {
            debug!(generation = token.0, "Discarding superseded route response");
            return Err(ApplicationError::Superseded);
        }

        state.selected = 0;
        match result {
            Ok(options) => {
                info!(count = options.len(), "Route options updated");
                state.options.clone_from(&options);
                Ok(options)
            },
            Err(e) => {
                warn!(error = %e, "Route request failed");
                state.options.clear();
                Err(e)
            },
        }
    }

    /// Fetch route options between two coordinates and make them current
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Superseded`] if another request was started
    /// while this one was in flight, or the directions port's error.
    #[instrument(
        skip(self, origin, destination),
        fields(origin = %origin, destination = %destination)
    )]
    pub async fn plan(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Vec<RouteOption>, ApplicationError> {
        let token = self.begin_request();
        let result = self.directions.fetch_routes(origin, destination).await;
        self.complete(token, result)
    }

    /// Select the option at `index`
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidSelection`] if `index` is out of range.
    pub fn select(&self, index: usize) -> Result<RouteOption, ApplicationError> {
        let mut state = self.state.write();
        let available = state.options.len();
        let option = state
            .options
            .get(index)
            .cloned()
            .ok_or(ApplicationError::InvalidSelection { index, available })?;
        state.selected = index;
        Ok(option)
    }

    /// The selected option, the first one unless [`select`](Self::select) was used
    #[must_use]
    pub fn selected(&self) -> Option<RouteOption> {
        let state = self.state.read();
        state.options.get(state.selected).cloned()
    }

    /// Index of the selected option
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        let state = self.state.read();
        (!state.options.is_empty()).then_some(state.selected)
    }

    /// All current options in provider order
    #[must_use]
    pub fn options(&self) -> Vec<RouteOption> {
        self.state.read().options.clone()
    }

    /// Whether the directions service can be reached
    pub async fn is_available(&self) -> bool {
        let available = self.directions.is_available().await;
        debug!(available, "Directions availability checked");
        available
    }
}
