//! Request and response types for the worker channel.

use moviepipe_core::Movie;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_AMOUNT;
use crate::error::ProtocolResult;

/// Deserializes an amount that may arrive as any JSON value.
/// Only a positive integer is kept; everything else falls back to the
/// default at dispatch time, so a sloppy bridge cannot fail a search.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().filter(|&n| n > 0))
}

/// A request line on the worker channel.
///
/// The wire shape is a flat JSON object with an `action` discriminator,
/// exactly what the gateway bridge writes:
/// `{"action":"search","amount":3,"genre":"Action"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRequest {
    /// Requested action: "search" or "health". Anything else (or a missing
    /// action) is answered with an Unknown action error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Requested number of movies. Lenient on the wire: a non-positive or
    /// non-integer value counts as absent.
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<u64>,

    /// Genre filter. Absent or empty means unfiltered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Recency window in months. Forwarded by the gateway, currently
    /// ignored by the worker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<u32>,
}

impl WorkerRequest {
    /// Creates a search request.
    pub fn search(amount: u64, genre: impl Into<String>) -> Self {
        Self {
            action: Some("search".to_string()),
            amount: Some(amount),
            genre: Some(genre.into()),
            range: None,
        }
    }

    /// Creates a health check request.
    pub fn health() -> Self {
        Self {
            action: Some("health".to_string()),
            ..Self::default()
        }
    }

    /// Builder: set the recency window.
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = Some(range);
        self
    }

    /// Parses a request from one decoded line.
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    /// Renders the newline-terminated request line.
    pub fn to_line(&self) -> ProtocolResult<Vec<u8>> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }

    /// The amount to sample, with the protocol default applied.
    pub fn effective_amount(&self) -> usize {
        self.amount.map(|n| n as usize).unwrap_or(DEFAULT_AMOUNT)
    }

    /// The genre filter, with absent mapped to "" (unfiltered).
    pub fn effective_genre(&self) -> &str {
        self.genre.as_deref().unwrap_or("")
    }
}

/// A response payload on the worker channel.
///
/// Serializes to one of the three shapes the bridge understands:
/// `{"movies":[...]}`, `{"status":"ok"}`, or `{"error":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkerResponse {
    /// Search result.
    Movies { movies: Vec<Movie> },

    /// Health check result.
    Status { status: String },

    /// Structured failure; the connection stays open.
    Error { error: String },
}

impl WorkerResponse {
    /// Creates a search response.
    pub fn movies(movies: Vec<Movie>) -> Self {
        Self::Movies { movies }
    }

    /// Creates a healthy status response.
    pub fn ok() -> Self {
        Self::Status {
            status: "ok".to_string(),
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Returns true unless this is an error response.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Error { .. })
    }

    /// Returns the error message if this is an error response.
    pub fn as_error(&self) -> Option<&str> {
        match self {
            Self::Error { error } => Some(error),
            _ => None,
        }
    }

    /// Serializes the response payload (unframed).
    pub fn to_payload(&self) -> ProtocolResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parses a response from a decoded frame payload.
    pub fn parse(payload: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(payload)
    }
}

/// The `{"movies":[...]}` body shared by the worker's search response and
/// the gateway's `/search-pipe` and `/structure` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieList {
    /// The movies matching the request.
    pub movies: Vec<Movie>,
}
