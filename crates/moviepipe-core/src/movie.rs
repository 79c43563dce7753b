//! Movie record type shared by every transport.

use serde::{Deserialize, Serialize};

/// A single movie record.
///
/// This is the unit of data every transport ultimately produces: the worker
/// samples these from its catalog, and the remote structuring service emits
/// the same shape. Field names are camelCase on the wire (`releaseDate`,
/// `leadActors`) to match the gateway contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Movie title.
    pub title: String,

    /// Director name.
    pub director: String,

    /// Release date, formatted `DD.MM.YYYY`.
    pub release_date: String,

    /// Free-form runtime description (e.g. "2 hours 15 minutes").
    pub runtime: String,

    /// Lead actors, in billing order.
    pub lead_actors: Vec<String>,

    /// Genres, primary genre first. Never empty for a valid record.
    pub genre: Vec<String>,

    /// Short plot description.
    pub description: String,
}

impl Movie {
    /// Creates a movie record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        director: impl Into<String>,
        release_date: impl Into<String>,
        runtime: impl Into<String>,
        lead_actors: Vec<String>,
        genre: Vec<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            director: director.into(),
            release_date: release_date.into(),
            runtime: runtime.into(),
            lead_actors,
            genre,
            description: description.into(),
        }
    }

    /// Returns true if this movie is tagged with the given genre.
    ///
    /// Matching is exact on the genre name, like the catalog keys.
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genre.iter().any(|g| g == genre)
    }
}
