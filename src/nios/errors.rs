// 3rd party crates
use thiserror::Error;

/// Errors returned by the WAPI client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("WAPI returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid WAPI URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to decode WAPI response: {message} - Raw: {body}")]
    Decode { message: String, body: String },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

#[derive(Debug, Error)]
pub enum NiosValidationError {
    #[error("Grid master host is not set")]
    MissingHost,
    #[error("WAPI username is not set")]
    MissingUsername,
    #[error("WAPI password is not set")]
    MissingPassword,
    #[error("Invalid WAPI version '{0}'")]
    InvalidWapiVersion(String),
    #[error("Request timeout must be greater than 0")]
    InvalidTimeout,
}
