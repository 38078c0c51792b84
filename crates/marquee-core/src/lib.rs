//! Core of the Marquee movie vault
//!
//! A vault is a directory tree of Obsidian notes:
//!
//! - `movies/<title>.md` - one note per movie, YAML frontmatter plus a body
//! - `actors/<name>.md` - empty stub per tracked cast member
//! - `genres/<name>.md` - empty stub per genre
//! - `attachments/<title>.jpg` - the movie poster
//!
//! [`Vault`] owns that layout. It is seeded from the stubs already on disk
//! and creates a movie note together with the stubs and poster it links to.
//! Metadata comes from a [`MetadataProvider`] and poster bytes from a
//! [`PosterDownloader`]; both are traits so the network side can be swapped
//! out in tests.
//!
//! # Example
//!
//! ```no_run
//! use marquee_core::{HttpDownloader, Movie, Vault};
//!
//! # async fn example(movie: Movie) -> Result<(), Box<dyn std::error::Error>> {
//! let mut vault = Vault::load("/home/me/Movies")?;
//! vault.create_movie(&movie, &HttpDownloader::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod cast;
pub mod http;
pub mod movie;
pub mod note;
pub mod obsidian;
pub mod observer;
pub mod provider;
pub mod vault;

pub use cast::{select_cast, CastSelection, SelectedActor, SelectionReason};
pub use http::{DownloadError, HttpDownloader, PosterDownloader};
pub use movie::{Actor, Movie, MovieSearchResult};
pub use note::{MovieNote, RenderError};
pub use obsidian::{sanitize_filename, Link};
pub use observer::{NoopObserver, StubKind, TracingObserver, VaultObserver};
pub use provider::{resolve_movie, MetadataProvider, MovieQuery, ProviderError, ResolveError};
pub use vault::{Vault, VaultError};
