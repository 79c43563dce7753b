//! Built-in static catalog.

use moviepipe_core::Movie;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::CatalogResult;
use crate::provider::CatalogProvider;

/// A catalog over a fixed in-memory list of movies.
///
/// Sampling is shuffle-then-truncate over the filtered subset, which gives
/// selection without replacement for free. An unknown genre falls back to
/// the full catalog, matching the reference worker's policy.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    movies: Vec<Movie>,
}

impl StaticCatalog {
    /// Creates a catalog over the given records.
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    /// Creates the built-in demo catalog.
    pub fn builtin() -> Self {
        Self::new(builtin_movies())
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Returns true if the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Consumes the catalog, returning its records in insertion order.
    pub fn into_movies(self) -> Vec<Movie> {
        self.movies
    }
}

impl CatalogProvider for StaticCatalog {
    fn sample(&self, amount: usize, genre: &str) -> CatalogResult<Vec<Movie>> {
        let mut subset: Vec<Movie> = if genre.is_empty() {
            self.movies.clone()
        } else {
            let filtered: Vec<Movie> = self
                .movies
                .iter()
                .filter(|m| m.has_genre(genre))
                .cloned()
                .collect();
            if filtered.is_empty() {
                // Unknown genre: fall back to the full catalog.
                debug!(genre, "no records for genre, sampling full catalog");
                self.movies.clone()
            } else {
                filtered
            }
        };

        let mut rng = rand::rng();
        subset.shuffle(&mut rng);
        subset.truncate(amount);
        Ok(subset)
    }
}

fn movie(
    title: &str,
    director: &str,
    release_date: &str,
    runtime: &str,
    lead_actors: &[&str],
    genre: &[&str],
    description: &str,
) -> Movie {
    Movie::new(
        title,
        director,
        release_date,
        runtime,
        lead_actors.iter().map(|s| s.to_string()).collect(),
        genre.iter().map(|s| s.to_string()).collect(),
        description,
    )
}

fn builtin_movies() -> Vec<Movie> {
    vec![
        movie(
            "Thunderstrike",
            "Michael Bay",
            "15.03.2025",
            "2 hours 15 minutes",
            &["Tom Cruise", "Scarlett Johansson"],
            &["Action", "Thriller"],
            "An elite soldier must stop a terrorist organization from launching a global attack.",
        ),
        movie(
            "Velocity",
            "James Cameron",
            "22.04.2025",
            "2 hours 30 minutes",
            &["Dwayne Johnson", "Gal Gadot"],
            &["Action", "Sci-Fi"],
            "In a dystopian future, street racers compete in deadly tournaments for survival.",
        ),
        movie(
            "Dark Phoenix Rising",
            "Christopher Nolan",
            "05.05.2025",
            "2 hours 40 minutes",
            &["Christian Bale", "Emily Blunt"],
            &["Action", "Drama"],
            "A vigilante rises from the shadows to protect the city from organized crime.",
        ),
        movie(
            "Laugh Out Loud",
            "Judd Apatow",
            "10.05.2025",
            "1 hour 45 minutes",
            &["Kevin Hart", "Amy Schumer"],
            &["Comedy"],
            "Two unlikely friends open a comedy club and face hilarious challenges.",
        ),
        movie(
            "The Funny Business",
            "Adam McKay",
            "20.06.2025",
            "1 hour 55 minutes",
            &["Will Ferrell", "Tina Fey"],
            &["Comedy"],
            "A failing business gets an unexpected boost from a viral marketing campaign.",
        ),
        movie(
            "Quantum Paradox",
            "Denis Villeneuve",
            "18.06.2025",
            "2 hours 45 minutes",
            &["Matthew McConaughey", "Anne Hathaway"],
            &["Sci-Fi", "Drama"],
            "Scientists discover a way to communicate with parallel universes.",
        ),
        movie(
            "Stellar Horizon",
            "Ridley Scott",
            "12.07.2025",
            "2 hours 20 minutes",
            &["Ryan Gosling", "Jessica Chastain"],
            &["Sci-Fi", "Thriller"],
            "A deep space mission encounters an unknown alien intelligence.",
        ),
        movie(
            "Echoes of Tomorrow",
            "Damien Chazelle",
            "15.08.2025",
            "2 hours 10 minutes",
            &["Emma Stone", "Oscar Isaac"],
            &["Drama"],
            "A musician struggles to find meaning in life after a devastating loss.",
        ),
    ]
}
