//! TMDB metadata provider for Marquee
//!
//! [`TmdbClient`] implements [`marquee_core::MetadataProvider`] against the
//! TMDB v3 API using a bearer access token.

mod client;
mod types;

pub use client::{movie_url, search_url, TmdbClient, DEFAULT_BASE_URL};
pub use types::POSTER_BASE_URL;
