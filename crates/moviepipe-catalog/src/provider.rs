//! CatalogProvider trait definition.

use moviepipe_core::Movie;

use crate::error::CatalogResult;

/// A source of movie records the worker can sample from.
///
/// Implementations must be safe for concurrent `sample` calls from
/// different connections; read-only access to immutable data is enough.
///
/// # Contract
///
/// - The result holds `min(amount, |matching subset|)` records.
/// - Selection is randomized without replacement: no record appears twice
///   in one result, and repeated calls with the same arguments are free to
///   return a different order or subset.
/// - A non-empty `genre` restricts sampling to records carrying that
///   genre; how an unknown genre is handled (empty result or full-catalog
///   fallback) is provider policy, not part of the protocol contract.
pub trait CatalogProvider: Send + Sync {
    /// Samples up to `amount` movies, optionally filtered by genre
    /// (`""` means unfiltered).
    fn sample(&self, amount: usize, genre: &str) -> CatalogResult<Vec<Movie>>;
}
