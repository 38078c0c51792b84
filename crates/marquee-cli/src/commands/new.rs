use anyhow::{bail, Context, Result};
use marquee_core::{
    resolve_movie, HttpDownloader, MetadataProvider, Movie, MovieQuery, MovieSearchResult,
    PosterDownloader, ResolveError, Vault,
};
use marquee_tmdb::{movie_url, search_url, TmdbClient};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::cli::NewArgs;
use crate::config::CliConfig;

const SUMMARY_SYNOPSIS_LEN: usize = 40;
const CANDIDATE_SYNOPSIS_LEN: usize = 120;

/// Look up a movie on TMDB and add it to the vault.
pub async fn execute(config: CliConfig, args: NewArgs) -> Result<()> {
    let query = MovieQuery {
        id: args.id,
        title: args.title,
    };
    if query.is_empty() {
        bail!("new movie: {}", ResolveError::MissingQuery);
    }

    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().context("Failed to build HTTP client")?;

    let provider = TmdbClient::with_client(
        client.clone(),
        config.tmdb.base_url.as_str(),
        config.tmdb_access_token(),
    )
    .context("tmdb: new client (set TMDB_ACCESS_TOKEN or [tmdb] access_token)")?;
    let downloader = HttpDownloader::with_client(client);

    run(&provider, &downloader, &config.vault.path, &query).await
}

/// Resolve `query` through `provider` and create the movie in the vault at
/// `vault_dir`.
pub async fn run(
    provider: &dyn MetadataProvider,
    downloader: &dyn PosterDownloader,
    vault_dir: &Path,
    query: &MovieQuery,
) -> Result<()> {
    let movie = match resolve_movie(provider, query).await {
        Ok(movie) => movie,
        Err(ResolveError::Ambiguous { title, candidates }) => {
            print!("{}", format_candidates(&title, &candidates)?);
            bail!("multiple results found: run again with the --id flag");
        }
        Err(err) => return Err(err).context("new movie"),
    };

    log_summary(&movie);

    let mut vault = Vault::load(vault_dir).context("new movie")?;
    vault
        .create_movie(&movie, downloader)
        .await
        .context("new movie")?;

    Ok(())
}

fn log_summary(movie: &Movie) {
    info!("Summary:");
    info!("  Synopsis: {}", truncate(SUMMARY_SYNOPSIS_LEN, &movie.synopsis));
    info!("  Release date: {}", movie.release_date);
    info!("  Runtime: {} minutes", movie.runtime);
    info!("  IMDB ID: {}", movie.imdb_id);
    info!("  TMDB ID: {}", movie.tmdb_id);
    info!("  Collection: {}", movie.collection.as_deref().unwrap_or_default());
    info!("  Cast Members: {}", movie.cast.len());
    info!("  Genres: {}", movie.genres.len());
    info!("  Poster URL: {}", movie.poster_url);
}

/// Listing shown when a title search matches more than one movie
pub fn format_candidates(
    title: &str,
    candidates: &[MovieSearchResult],
) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    writeln!(output, "Found {} results for {:?}:", candidates.len(), title)?;
    writeln!(output)?;
    for candidate in candidates {
        writeln!(output, "=== {} ({})", candidate.title, candidate.release_date)?;
        writeln!(output, "    {}", movie_url(candidate.id))?;
        writeln!(
            output,
            "    {}",
            truncate(CANDIDATE_SYNOPSIS_LEN, &candidate.synopsis)
        )?;
        writeln!(output)?;
    }
    writeln!(output, "Full search results: {}", search_url(title))?;

    Ok(output)
}

/// Shorten `s` to at most `n` characters, ending in `...` when cut.
pub fn truncate(n: usize, s: &str) -> String {
    if s.chars().count() < n {
        return s.to_string();
    }
    let kept: String = s.chars().take(n.saturating_sub(3)).collect();
    format!("{kept}...")
}
