//! Error types for shipwise

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

/// A rate query could not be issued because its route identifiers are unusable.
///
/// The user fixes the input; there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("warehouse missing: origin pincode {0:?} is not a 6-digit code, select a pickup warehouse")]
    WarehouseMissing(String),

    #[error("destination missing: destination pincode {0:?} is not a 6-digit code")]
    DestinationMissing(String),
}

/// The rating service could not produce a usable quote list.
///
/// Transient from the caller's point of view: offer a retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateFetchError {
    #[error("transport error calling {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: String },

    #[error("rating service {endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("malformed rate response: {reason}")]
    MalformedResponse { reason: String },

    #[error("invalid quote record #{index}: {reason}")]
    InvalidQuote { index: usize, reason: String },
}

/// Errors surfaced by a rate query
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("rate fetch failed: {0}")]
    Fetch(#[from] RateFetchError),
}

impl RateError {
    /// Whether showing a retry affordance makes sense for this failure
    pub fn is_retryable(&self) -> bool {
        matches!(self, RateError::Fetch(_))
    }
}

/// The order/payment collaborator refused or never answered a hand-off
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HandoffError {
    #[error("transport error calling {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("order service {endpoint} rejected the hand-off with {status}: {body}")]
    Rejected {
        endpoint: String,
        status: u16,
        body: String,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid parcel: {0}")]
    InvalidParcel(String),

    #[error("Parcel file error: {0}")]
    ParcelFile(String),

    #[error("Unknown warehouse: {0}")]
    UnknownWarehouse(String),

    #[error("Rate query failed: {0}")]
    Rate(#[from] RateError),

    #[error("Booking failed: {0}")]
    Booking(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
