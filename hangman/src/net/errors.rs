//! Network error types for serialization and protocol operations.

use thiserror::Error;

/// Errors that can occur while encoding or decoding protocol frames
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Failed to encode a message
    #[error("Failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    /// Failed to decode a message, including unknown envelope names
    #[error("Failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),

    /// Request object with no valid interpretation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Frame size exceeded maximum allowed
    #[error("Message size {actual} exceeds maximum {max}")]
    MessageTooLarge { actual: usize, max: usize },
}

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
