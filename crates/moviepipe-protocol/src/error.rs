//! Protocol error types.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The length line of a frame was not a decimal integer.
    #[error("invalid frame length line: {text:?}")]
    InvalidLength { text: String },

    /// Frame payload exceeds the maximum allowed size.
    #[error("frame too large: {size} bytes (max: {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// A request line grew past the maximum size without a terminator.
    #[error("request line too long (max: {max} bytes)")]
    LineTooLong { max: usize },

    /// A request line was not valid UTF-8.
    #[error("request line is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Failed to serialize or deserialize a message.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
