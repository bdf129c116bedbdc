//! Error types and handling for zecharge
//!
//! This module defines the error types used throughout the crate. Schedule
//! data problems (`InvalidSchedule`) are kept apart from lookup failures
//! (`NotFound`) and caller mistakes (`InvalidArgument`).

use thiserror::Error;

/// Result type alias for zecharge operations
pub type Result<T> = std::result::Result<T, ZeChargeError>;

/// Main error type for zecharge
#[derive(Debug, Error)]
pub enum ZeChargeError {
    /// A charge, schedule or schedule collection failed validation
    #[error("Invalid schedule: {message}")]
    InvalidSchedule { message: String },

    /// A day or schedule id that is not present was looked up
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The caller broke an API contract (bad day name, reversed interval, ...)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Network-related errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Vehicle API errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Authentication/authorization errors
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Field-level validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },
}

impl ZeChargeError {
    /// Create a new invalid schedule error
    pub fn invalid_schedule<S: Into<String>>(message: S) -> Self {
        ZeChargeError::InvalidSchedule {
            message: message.into(),
        }
    }

    /// Create a new lookup failure
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        ZeChargeError::NotFound {
            message: message.into(),
        }
    }

    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        ZeChargeError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        ZeChargeError::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ZeChargeError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        ZeChargeError::Io {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        ZeChargeError::Network {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        ZeChargeError::Api {
            message: message.into(),
        }
    }

    /// Create a new auth error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        ZeChargeError::Auth {
            message: message.into(),
        }
    }

    /// Whether this error came out of schedule validation
    pub fn is_invalid_schedule(&self) -> bool {
        matches!(self, ZeChargeError::InvalidSchedule { .. })
    }
}

impl From<std::io::Error> for ZeChargeError {
    fn from(err: std::io::Error) -> Self {
        ZeChargeError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for ZeChargeError {
    fn from(err: serde_yaml::Error) -> Self {
        ZeChargeError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ZeChargeError {
    fn from(err: serde_json::Error) -> Self {
        ZeChargeError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "kamereon")]
impl From<reqwest::Error> for ZeChargeError {
    fn from(err: reqwest::Error) -> Self {
        ZeChargeError::network(err.to_string())
    }
}
