//! Movie metadata providers and lookup policy

use crate::movie::{Movie, MovieSearchResult};
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

/// Errors reported by a [`MetadataProvider`]
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("metadata provider access token is not set")]
    MissingToken,

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Source of movie metadata
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Full details and credits for one movie
    async fn get_movie(&self, id: u64) -> Result<Movie, ProviderError>;

    /// Candidates matching a title
    async fn search_movie(&self, title: &str) -> Result<Vec<MovieSearchResult>, ProviderError>;
}

/// What the user asked for. An id always wins over a title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieQuery {
    pub id: Option<u64>,
    pub title: Option<String>,
}

impl MovieQuery {
    pub fn by_id(id: u64) -> Self {
        Self {
            id: Some(id),
            title: None,
        }
    }

    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
        }
    }

    /// True when neither a usable id nor a non-blank title is set.
    pub fn is_empty(&self) -> bool {
        self.id().is_none() && self.title().is_none()
    }

    fn id(&self) -> Option<u64> {
        self.id.filter(|id| *id != 0)
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Errors from [`resolve_movie`]
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("you must specify either an id or a title")]
    MissingQuery,

    #[error("no results for movie: {title}")]
    NotFound { title: String },

    /// More than one candidate; the caller has to pick one by id.
    #[error("multiple results found for {title:?}")]
    Ambiguous {
        title: String,
        candidates: Vec<MovieSearchResult>,
    },

    #[error("get movie {id}: {source}")]
    Get {
        id: u64,
        #[source]
        source: ProviderError,
    },

    #[error("search movie {title:?}: {source}")]
    Search {
        title: String,
        #[source]
        source: ProviderError,
    },
}

/// Turn a query into exactly one movie.
///
/// A title search only succeeds when it has a single hit. Several hits come
/// back as [`ResolveError::Ambiguous`] with every candidate, never the first.
pub async fn resolve_movie(
    provider: &dyn MetadataProvider,
    query: &MovieQuery,
) -> Result<Movie, ResolveError> {
    if let Some(id) = query.id() {
        return get_movie(provider, id).await;
    }

    let title = query.title().ok_or(ResolveError::MissingQuery)?;
    info!("Searching for movie: {}", title);

    let mut results = provider
        .search_movie(title)
        .await
        .map_err(|source| ResolveError::Search {
            title: title.to_string(),
            source,
        })?;

    match results.len() {
        0 => Err(ResolveError::NotFound {
            title: title.to_string(),
        }),
        1 => {
            let only = results.remove(0);
            get_movie(provider, only.id).await
        }
        _ => Err(ResolveError::Ambiguous {
            title: title.to_string(),
            candidates: results,
        }),
    }
}

async fn get_movie(provider: &dyn MetadataProvider, id: u64) -> Result<Movie, ResolveError> {
    info!("Getting movie: {}", id);
    provider
        .get_movie(id)
        .await
        .map_err(|source| ResolveError::Get { id, source })
}
