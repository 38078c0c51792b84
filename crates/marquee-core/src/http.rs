//! Poster downloads
//!
//! The vault only needs "give me the bytes at this URL". [`HttpDownloader`]
//! does that with reqwest; tests substitute their own [`PosterDownloader`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while downloading
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("bad status from {url}: {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Fetches the full contents of a URL into memory
#[async_trait]
pub trait PosterDownloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}

/// [`PosterDownloader`] over HTTP(S)
#[derive(Debug, Clone, Default)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing client, sharing its connection pool and settings.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Build a downloader whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PosterDownloader for HttpDownloader {
    async fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| DownloadError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| DownloadError::Body {
            url: url.to_string(),
            source,
        })?;

        Ok(body.to_vec())
    }
}
