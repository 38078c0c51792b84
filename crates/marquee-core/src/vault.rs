//! The movie vault on disk

use crate::cast::select_cast;
use crate::http::{DownloadError, PosterDownloader};
use crate::movie::Movie;
use crate::note::{MovieNote, RenderError, NEWLY_ADDED_PLAYLIST};
use crate::obsidian::{sanitize_filename, Link};
use crate::observer::{StubKind, TracingObserver, VaultObserver};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

const ATTACHMENTS_DIR: &str = "attachments";
const MOVIES_DIR: &str = "movies";
const NOTE_EXTENSION: &str = "md";
const POSTER_EXTENSION: &str = "jpg";

const IMDB_TITLE_URL: &str = "https://m.imdb.com/title";
const TMDB_MOVIE_URL: &str = "https://www.themoviedb.org/movie";

/// Errors from vault operations. Each names the operation that failed.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("{op}: {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{op}: invalid pattern {pattern:?}: {source}")]
    Pattern {
        op: &'static str,
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("{op}: {source}")]
    Listing {
        op: &'static str,
        #[source]
        source: glob::GlobError,
    },

    #[error("download poster: {0}")]
    Download(#[from] DownloadError),

    #[error("render note: {0}")]
    Render(#[from] RenderError),
}

impl VaultError {
    fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type VaultResult<T> = Result<T, VaultError>;

/// A movie vault rooted at a directory.
///
/// The actor and genre caches start as the stubs found on disk at load time
/// and grow as stubs are created. They are never pruned.
pub struct Vault {
    root: PathBuf,
    attachments_dir: PathBuf,
    movies_dir: PathBuf,
    actors_dir: PathBuf,
    genres_dir: PathBuf,
    actors: BTreeSet<String>,
    genres: BTreeSet<String>,
    observer: Arc<dyn VaultObserver>,
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("root", &self.root)
            .field("actors", &self.actors.len())
            .field("genres", &self.genres.len())
            .finish()
    }
}

impl Vault {
    /// Open the vault at `root`, reporting progress through `tracing`.
    pub fn load(root: impl AsRef<Path>) -> VaultResult<Self> {
        Self::load_with_observer(root, Arc::new(TracingObserver))
    }

    /// Open the vault at `root`, seeding the caches from `actors/*.md` and
    /// `genres/*.md`. A missing stub directory counts as empty.
    pub fn load_with_observer(
        root: impl AsRef<Path>,
        observer: Arc<dyn VaultObserver>,
    ) -> VaultResult<Self> {
        let root = root.as_ref().to_path_buf();
        let mut vault = Self {
            attachments_dir: root.join(ATTACHMENTS_DIR),
            movies_dir: root.join(MOVIES_DIR),
            actors_dir: root.join(StubKind::Actor.dir_name()),
            genres_dir: root.join(StubKind::Genre.dir_name()),
            root,
            actors: BTreeSet::new(),
            genres: BTreeSet::new(),
            observer,
        };

        vault.actors = vault.load_stubs(StubKind::Actor, "load actors")?;
        vault.genres = vault.load_stubs(StubKind::Genre, "load genres")?;

        Ok(vault)
    }

    /// Create the root and its four subdirectories if they are missing.
    pub fn ensure_layout(&self) -> VaultResult<()> {
        for dir in [
            &self.attachments_dir,
            &self.movies_dir,
            &self.actors_dir,
            &self.genres_dir,
        ] {
            fs::create_dir_all(dir).map_err(|e| VaultError::io("ensure layout", dir, e))?;
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn attachments_dir(&self) -> &Path {
        &self.attachments_dir
    }

    pub fn movies_dir(&self) -> &Path {
        &self.movies_dir
    }

    pub fn actors_dir(&self) -> &Path {
        &self.actors_dir
    }

    pub fn genres_dir(&self) -> &Path {
        &self.genres_dir
    }

    pub fn known_actors(&self) -> &BTreeSet<String> {
        &self.actors
    }

    pub fn known_genres(&self) -> &BTreeSet<String> {
        &self.genres
    }

    /// Create (or truncate) the empty note `actors/<name>.md`.
    pub fn create_actor(&mut self, name: &str) -> VaultResult<()> {
        self.create_stub(StubKind::Actor, name)
    }

    /// Create (or truncate) the empty note `genres/<name>.md`.
    pub fn create_genre(&mut self, name: &str) -> VaultResult<()> {
        self.create_stub(StubKind::Genre, name)
    }

    /// Write a movie note along with its poster and the stubs it links to.
    ///
    /// Steps run in order and the first failure aborts. Nothing already
    /// written is removed, so a failure part way through can leave the poster
    /// and some stubs behind without a note. An existing note with the same
    /// sanitized title is overwritten.
    pub async fn create_movie(
        &mut self,
        movie: &Movie,
        downloader: &dyn PosterDownloader,
    ) -> VaultResult<()> {
        let title = sanitize_filename(&movie.title);
        let poster_filename = format!("{title}.{POSTER_EXTENSION}");

        self.download_poster(&movie.poster_url, &poster_filename, downloader)
            .await?;

        let collection = movie.collection.as_deref().unwrap_or_default();
        let mut note = MovieNote {
            imdb_id: movie.imdb_id.clone(),
            owned: false,
            playlists: vec![Link::new(NEWLY_ADDED_PLAYLIST)],
            tmdb_id: movie.tmdb_id,

            collection: Link::new(sanitize_filename(collection)),
            imdb_url: format!("{IMDB_TITLE_URL}/{}", movie.imdb_id),
            poster: Link::new(poster_filename),
            release_date: movie.release_date.clone(),
            runtime: movie.runtime,
            synopsis: movie.synopsis.clone(),
            title: title.clone(),
            tmdb_url: format!("{TMDB_MOVIE_URL}/{}", movie.tmdb_id),
            ..Default::default()
        };

        let selection = select_cast(&movie.cast, &self.actors);
        for actor in &selection.selected {
            self.observer.cast_member_selected(actor);
            note.cast.push(Link::new(actor.name.as_str()));
            self.create_actor(&actor.name)?;
        }
        self.observer.cast_members_skipped(selection.skipped);

        for genre in &movie.genres {
            note.genres.push(Link::new(genre.as_str()));
            self.create_genre(genre)?;
        }

        let path = self.movies_dir.join(format!("{title}.{NOTE_EXTENSION}"));
        let file = File::create(&path).map_err(|e| VaultError::io("create movie", &path, e))?;
        note.write_to(file)?;
        self.observer.note_created(&path);

        Ok(())
    }

    async fn download_poster(
        &self,
        url: &str,
        filename: &str,
        downloader: &dyn PosterDownloader,
    ) -> VaultResult<()> {
        self.observer.downloading_poster(url);

        let bytes = downloader.download(url).await?;

        let path = self.attachments_dir.join(filename);
        fs::write(&path, bytes).map_err(|e| VaultError::io("download poster", &path, e))
    }

    fn create_stub(&mut self, kind: StubKind, name: &str) -> VaultResult<()> {
        let (dir, cache, op) = match kind {
            StubKind::Actor => (&self.actors_dir, &mut self.actors, "create actor"),
            StubKind::Genre => (&self.genres_dir, &mut self.genres, "create genre"),
        };
        let path = dir.join(format!("{name}.{NOTE_EXTENSION}"));

        File::create(&path).map_err(|e| VaultError::io(op, &path, e))?;
        cache.insert(name.to_string());
        self.observer.stub_created(kind, &path);

        Ok(())
    }

    fn load_stubs(&self, kind: StubKind, op: &'static str) -> VaultResult<BTreeSet<String>> {
        let dir = match kind {
            StubKind::Actor => &self.actors_dir,
            StubKind::Genre => &self.genres_dir,
        };
        self.observer.loading_stubs(kind, dir);

        let names = note_names(dir, op)?;
        self.observer.loaded_stubs(kind, names.len());

        Ok(names)
    }
}

/// Base names of the `*.md` files directly inside `dir`.
fn note_names(dir: &Path, op: &'static str) -> VaultResult<BTreeSet<String>> {
    let pattern = format!(
        "{}/*.{NOTE_EXTENSION}",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let entries = glob::glob(&pattern).map_err(|source| VaultError::Pattern {
        op,
        pattern: pattern.clone(),
        source,
    })?;

    let mut names = BTreeSet::new();
    for entry in entries {
        let path = entry.map_err(|source| VaultError::Listing { op, source })?;
        if let Some(stem) = path.file_stem() {
            names.insert(stem.to_string_lossy().into_owned());
        }
    }

    Ok(names)
}
