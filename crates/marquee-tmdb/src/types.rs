//! TMDB v3 response bodies
//!
//! Only the fields Marquee reads are modelled. TMDB leaves many of them null
//! for obscure titles, so everything defaults.

use marquee_core::{Actor, Movie, MovieSearchResult};
use serde::Deserialize;

/// Base URL for full-size poster images
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub imdb_id: Option<String>,
    pub poster_path: Option<String>,
    pub belongs_to_collection: Option<Collection>,
    pub genres: Vec<Genre>,
}

impl MovieDetails {
    /// Full image URL for the poster, or empty when TMDB has none.
    pub fn poster_url(&self) -> String {
        match self.poster_path.as_deref() {
            Some(path) if !path.is_empty() => format!("{POSTER_BASE_URL}{path}"),
            _ => String::new(),
        }
    }

    pub fn into_movie(self, credits: Credits) -> Movie {
        let poster_url = self.poster_url();
        Movie {
            title: self.title,
            synopsis: self.overview.unwrap_or_default(),
            release_date: self.release_date.unwrap_or_default(),
            runtime: self.runtime.unwrap_or_default(),
            imdb_id: self.imdb_id.unwrap_or_default(),
            tmdb_id: self.id,
            collection: self
                .belongs_to_collection
                .map(|c| c.name)
                .filter(|name| !name.is_empty()),
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            cast: credits
                .cast
                .into_iter()
                .map(|m| Actor::new(m.name, m.order, m.popularity))
                .collect(),
            poster_url,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Collection {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Genre {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Credits {
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CastMember {
    pub name: String,
    pub order: u32,
    pub popularity: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SearchResponse {
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SearchHit {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub popularity: f64,
    pub vote_count: u64,
}

impl From<SearchHit> for MovieSearchResult {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.id,
            title: hit.title,
            release_date: hit.release_date.unwrap_or_default(),
            synopsis: hit.overview.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_tolerate_nulls() {
        let details: MovieDetails = serde_json::from_str(
            r#"{"id": 7, "title": "Obscure", "overview": null, "runtime": null,
                "imdb_id": null, "poster_path": null, "belongs_to_collection": null}"#,
        )
        .unwrap();

        let movie = details.into_movie(Credits::default());

        assert_eq!(movie.tmdb_id, 7);
        assert_eq!(movie.runtime, 0);
        assert_eq!(movie.poster_url, "");
        assert_eq!(movie.collection, None);
        assert!(movie.genres.is_empty());
    }

    #[test]
    fn test_poster_url_prefixes_image_base() {
        let details = MovieDetails {
            poster_path: Some("/abc.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(
            details.poster_url(),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
    }
}
