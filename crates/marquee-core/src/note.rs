//! Movie note rendering
//!
//! A movie note is YAML frontmatter (the fields a user edits or queries
//! with Dataview) followed by a generated markdown body.

use crate::obsidian::Link;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt::Write as _;
use std::io;
use thiserror::Error;

/// Playlist every new note starts in
pub const NEWLY_ADDED_PLAYLIST: &str = "Newly Added";

const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur while rendering a note
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode frontmatter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    #[error("invalid release date {date:?}: {source}")]
    ReleaseDate {
        date: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("failed to format note body: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("failed to write note: {0}")]
    Io(#[from] io::Error),
}

/// The vault representation of a movie.
///
/// Only the frontmatter fields are serialized; the rest feed the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieNote {
    // Frontmatter
    pub imdb_id: String,
    pub last_watched: String,
    pub owned: bool,
    pub playlists: Vec<Link>,
    pub tmdb_id: u64,

    // Body
    #[serde(skip)]
    pub cast: Vec<Link>,
    #[serde(skip)]
    pub collection: Link,
    #[serde(skip)]
    pub genres: Vec<Link>,
    #[serde(skip)]
    pub imdb_url: String,
    #[serde(skip)]
    pub poster: Link,
    #[serde(skip)]
    pub release_date: String,
    #[serde(skip)]
    pub runtime: u32,
    #[serde(skip)]
    pub synopsis: String,
    #[serde(skip)]
    pub title: String,
    #[serde(skip)]
    pub tmdb_url: String,
}

impl Default for MovieNote {
    fn default() -> Self {
        Self {
            imdb_id: String::new(),
            last_watched: String::new(),
            owned: false,
            playlists: vec![Link::new(NEWLY_ADDED_PLAYLIST)],
            tmdb_id: 0,
            cast: Vec::new(),
            collection: Link::default(),
            genres: Vec::new(),
            imdb_url: String::new(),
            poster: Link::default(),
            release_date: String::new(),
            runtime: 0,
            synopsis: String::new(),
            title: String::new(),
            tmdb_url: String::new(),
        }
    }
}

impl MovieNote {
    /// Render the complete note: `---`, frontmatter, `---`, body.
    pub fn render(&self) -> Result<String, RenderError> {
        let mut output = String::new();

        writeln!(output, "---")?;
        output.push_str(&serde_yaml::to_string(self)?);
        writeln!(output, "---")?;

        self.render_body(&mut output)?;

        Ok(output)
    }

    /// Render the note and write it to `writer`.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> Result<(), RenderError> {
        let rendered = self.render()?;
        writer.write_all(rendered.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn render_body(&self, output: &mut String) -> Result<(), RenderError> {
        let year = release_year(&self.release_date)?;

        writeln!(output, "{}", self.poster.embed())?;
        writeln!(output)?;
        writeln!(output, "# {} ({year})", self.title)?;
        writeln!(output)?;
        writeln!(output, "{}", self.synopsis)?;
        writeln!(output)?;
        writeln!(output, "## Details")?;
        writeln!(output)?;
        writeln!(output, "- **Release date:** {}", self.release_date)?;
        writeln!(output, "- **Runtime:** {} minutes", self.runtime)?;
        if !self.collection.is_empty() {
            writeln!(output, "- **Collection:** {}", self.collection)?;
        }
        writeln!(output, "- **Genres:** {}", Link::inline(&self.genres))?;
        writeln!(output, "- **Cast:** {}", Link::inline(&self.cast))?;
        writeln!(output)?;
        writeln!(output, "## Links")?;
        writeln!(output)?;
        writeln!(output, "- [IMDb]({})", self.imdb_url)?;
        writeln!(output, "- [TMDB]({})", self.tmdb_url)?;

        Ok(())
    }
}

/// Year of a `YYYY-MM-DD` release date.
pub fn release_year(date: &str) -> Result<i32, RenderError> {
    NaiveDate::parse_from_str(date, RELEASE_DATE_FORMAT)
        .map(|d| d.year())
        .map_err(|source| RenderError::ReleaseDate {
            date: date.to_string(),
            source,
        })
}
