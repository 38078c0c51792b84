//! HTTP client for the TMDB v3 API

use crate::types::{Credits, MovieDetails, SearchResponse};
use async_trait::async_trait;
use marquee_core::{MetadataProvider, Movie, MovieSearchResult, ProviderError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

const WEBSITE_URL: &str = "https://www.themoviedb.org";

// Search hits below either bar are mostly featurettes and fan edits.
const MIN_POPULARITY: f64 = 1.0;
const MIN_VOTE_COUNT: u64 = 100;

/// Page for a movie on the TMDB website
pub fn movie_url(id: u64) -> String {
    format!("{WEBSITE_URL}/movie/{id}")
}

/// Website search for `title`, for when the API results need a human
pub fn search_url(title: &str) -> String {
    format!(
        "{WEBSITE_URL}/search/movie?query={}",
        urlencoding::encode(title)
    )
}

/// [`MetadataProvider`] backed by TMDB
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    /// Client for the public API using a v4 read access token.
    pub fn new(access_token: impl Into<String>) -> Result<Self, ProviderError> {
        Self::with_client(Client::new(), DEFAULT_BASE_URL, access_token)
    }

    /// Client with an explicit HTTP client and API root.
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(ProviderError::MissingToken);
        }

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(format!("{url}: {e}")))
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn get_movie(&self, id: u64) -> Result<Movie, ProviderError> {
        let details: MovieDetails = self.get_json(&format!("/movie/{id}"), &[]).await?;
        let credits: Credits = self.get_json(&format!("/movie/{id}/credits"), &[]).await?;

        Ok(details.into_movie(credits))
    }

    async fn search_movie(&self, title: &str) -> Result<Vec<MovieSearchResult>, ProviderError> {
        let response: SearchResponse = self
            .get_json("/search/movie", &[("query", title)])
            .await?;

        let total = response.results.len();
        let results: Vec<MovieSearchResult> = response
            .results
            .into_iter()
            .filter(|hit| hit.popularity >= MIN_POPULARITY && hit.vote_count >= MIN_VOTE_COUNT)
            .map(MovieSearchResult::from)
            .collect();
        debug!("Kept {} of {} search results", results.len(), total);

        Ok(results)
    }
}
