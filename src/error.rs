//! Error types and handling for `TripFinder`

use thiserror::Error;

/// Main error type for the `TripFinder` library
#[derive(Error, Debug)]
pub enum TripFinderError {
    /// Malformed filter or wire record (missing identity, missing budget pair)
    #[error("Mapping error: {message}")]
    Mapping { message: String },

    /// Destination duration range is inverted
    #[error("Invalid destination {id}: duration range {min}..{max} is inverted")]
    InvalidDestination { id: String, min: u32, max: u32 },

    /// Network failure or non-success status from the recommendation service
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
    },

    /// User input rejected before any network call
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Session store failures
    #[error("Session error: {message}")]
    Session { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl TripFinderError {
    /// Create a new mapping error
    pub fn mapping<S: Into<String>>(message: S) -> Self {
        Self::Mapping {
            message: message.into(),
        }
    }

    /// Create a new transport error without an HTTP status
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
        }
    }

    /// Create a new transport error for a non-success HTTP status
    pub fn transport_status<S: Into<String>>(message: S, status: u16) -> Self {
        Self::Transport {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new session error
    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripFinderError::Mapping { .. } => {
                "Received unexpected data from the recommendation service.".to_string()
            }
            TripFinderError::InvalidDestination { .. } => {
                "Pricing is unavailable for this destination.".to_string()
            }
            TripFinderError::Transport { .. } => {
                "Unable to reach the recommendation service. Please try again later.".to_string()
            }
            TripFinderError::Validation { message } => format!("Invalid input: {message}"),
            TripFinderError::Session { .. } => {
                "Your search could not be saved. Please search again.".to_string()
            }
            TripFinderError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for TripFinderError {
    fn from(err: serde_json::Error) -> Self {
        TripFinderError::mapping(err.to_string())
    }
}
