//! Worker error types.

use std::io;
use thiserror::Error;

/// Result type for worker operations.
pub type WorkerResult<T> = Result<T, WorkerError>;

/// Errors that can occur in the worker.
///
/// These are connection-scoped: a failing connection is closed and logged,
/// and never affects the listener or other connections. Dispatch-level
/// failures (bad JSON, unknown actions) are not errors here at all; they
/// become `{"error": ...}` payloads on the wire.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// IO error (socket, file, etc.).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Protocol error (framing, decoding).
    #[error("protocol error: {0}")]
    Protocol(#[from] moviepipe_protocol::ProtocolError),

    /// A read or write on a connection did not complete within the
    /// configured timeout.
    #[error("timeout during {operation}")]
    Timeout { operation: String },
}

impl WorkerError {
    /// Creates a timeout error.
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }
}
