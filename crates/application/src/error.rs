//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Access to the device location was refused
    #[error("Location permission denied: {0}")]
    PermissionDenied(String),

    /// The directions service has no route between the endpoints
    #[error("No routes found")]
    NoRouteFound,

    /// The directions request failed (network, HTTP status or response shape)
    #[error("Failed to fetch routes: {0}")]
    FetchError(String),

    /// A route carried an undecodable overview polyline
    #[error("Malformed route geometry: {0}")]
    MalformedPolyline(String),

    /// A newer request was issued before this one completed
    #[error("Request superseded by a newer one")]
    Superseded,

    /// A route option index outside the current options
    #[error("Invalid route selection {index}: {available} option(s) available")]
    InvalidSelection {
        /// Requested index
        index: usize,
        /// Number of options currently held
        available: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Title and body of a user-facing alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    /// Short alert title
    pub title: &'static str,
    /// Alert body
    pub body: String,
}

impl UserMessage {
    fn new(title: &'static str, body: impl Into<String>) -> Self {
        Self {
            title,
            body: body.into(),
        }
    }
}

impl ApplicationError {
    /// Check if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::FetchError(_))
    }

    /// Alert shown to the user for this error
    #[must_use]
    pub fn user_message(&self) -> UserMessage {
        match self {
            Self::PermissionDenied(_) => UserMessage::new(
                "Permission Denied",
                "Permission to access location was denied",
            ),
            Self::NoRouteFound => UserMessage::new("No Routes Found", "No Public Transports Found"),
            Self::FetchError(_) | Self::MalformedPolyline(_) => {
                UserMessage::new("Error", "Error fetching route details")
            },
            Self::Superseded => UserMessage::new(
                "Request Replaced",
                "A newer route request replaced this one",
            ),
            Self::InvalidSelection { .. } => {
                UserMessage::new("Invalid Selection", self.to_string())
            },
            Self::Configuration(msg) => UserMessage::new("Configuration Error", msg.clone()),
            Self::Domain(e) => UserMessage::new("Invalid Input", e.to_string()),
        }
    }
}
