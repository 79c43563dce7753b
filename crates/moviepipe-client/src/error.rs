//! Client error types.

use std::fmt;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// The gateway answered with a non-success status; the message is the
    /// response body, surfaced verbatim.
    Gateway(String),
    /// HTTP transport failure (connect, timeout, TLS).
    Http(reqwest::Error),
    /// One step of the two-step remote flow failed.
    Step { step: String, message: String },
    /// The local transport was chosen but the worker probe failed.
    WorkerUnavailable,
}

impl ClientError {
    /// Wraps a failure of the named remote-flow step.
    pub fn step(step: impl Into<String>, source: ClientError) -> Self {
        Self::Step {
            step: step.into(),
            message: source.to_string(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Gateway(msg) => write!(f, "{}", msg),
            Self::Http(err) => write!(f, "http error: {}", err),
            Self::Step { step, message } => {
                write!(f, "remote search failed while {}: {}", step, message)
            }
            Self::WorkerUnavailable => {
                write!(
                    f,
                    "Worker process is not available. Please start the worker first."
                )
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}
