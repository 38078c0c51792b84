//! Movie metadata as supplied by a [`MetadataProvider`](crate::MetadataProvider)

use serde::{Deserialize, Serialize};

/// Full metadata for a single film.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub synopsis: String,
    /// `YYYY-MM-DD`
    pub release_date: String,
    /// Minutes
    pub runtime: u32,
    pub imdb_id: String,
    pub tmdb_id: u64,
    /// Name of the collection (franchise) the film belongs to
    pub collection: Option<String>,
    pub genres: Vec<String>,
    /// Credits in provider order
    pub cast: Vec<Actor>,
    pub poster_url: String,
}

/// A cast member from a movie's credits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    /// Billing position, lower is more prominent
    pub order: u32,
    pub popularity: f64,
}

impl Actor {
    pub fn new(name: impl Into<String>, order: u32, popularity: f64) -> Self {
        Self {
            name: name.into(),
            order,
            popularity,
        }
    }
}

/// A search hit, enough to identify a film but without credits or genres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieSearchResult {
    pub id: u64,
    pub title: String,
    pub release_date: String,
    pub synopsis: String,
}
