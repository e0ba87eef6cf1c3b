//! Application layer - Use cases and orchestration
//!
//! Contains route planning and fare comparison, plus the port definitions the
//! infrastructure layer implements.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, UserMessage};
pub use ports::*;
pub use services::*;
