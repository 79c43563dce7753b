//! Catalog error types.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur in a catalog provider.
///
/// The built-in static catalog never fails, but providers backed by a
/// database or file can.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The provider rejected the filter.
    #[error("invalid filter: {message}")]
    InvalidFilter { message: String },

    /// The underlying data source failed.
    #[error("catalog source error: {message}")]
    Source { message: String },
}

impl CatalogError {
    /// Creates an invalid filter error.
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
        }
    }

    /// Creates a source error.
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }
}
