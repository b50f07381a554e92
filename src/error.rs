//! Error types for the catalog client.

use thiserror::Error;

/// Main error type for catalog client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A throttled wait was abandoned by its cancellation signal
    #[error("Operation cancelled while waiting for rate limit admission")]
    Cancelled,

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body decoding errors
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for catalog client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
