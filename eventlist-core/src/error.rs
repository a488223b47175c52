//! Error types for eventlist.

use thiserror::Error;

use crate::event::EventId;

/// Errors that can occur in eventlist operations.
#[derive(Error, Debug)]
pub enum EventListError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid event id: {0:?}")]
    InvalidId(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("No event id left after {0}")]
    IdsExhausted(EventId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for EventListError {
    fn from(err: serde_json::Error) -> Self {
        EventListError::Decode(err.to_string())
    }
}

/// Result type alias for eventlist operations.
pub type EventListResult<T> = Result<T, EventListError>;
