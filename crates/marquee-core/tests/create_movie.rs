//! End-to-end tests for creating movie notes in a vault

use async_trait::async_trait;
use marquee_core::{
    Actor, DownloadError, HttpDownloader, Movie, NoopObserver, PosterDownloader, Vault,
    VaultError,
};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POSTER_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

/// Serves the same bytes for every URL and remembers what was asked for
#[derive(Default)]
struct StaticDownloader {
    requested: Mutex<Vec<String>>,
}

#[async_trait]
impl PosterDownloader for StaticDownloader {
    async fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(POSTER_BYTES.to_vec())
    }
}

fn empty_vault(root: &Path) -> Vault {
    let vault = Vault::load_with_observer(root, Arc::new(NoopObserver)).unwrap();
    vault.ensure_layout().unwrap();
    vault
}

fn example_film() -> Movie {
    Movie {
        title: "Example Film".to_string(),
        synopsis: "Something happens.".to_string(),
        release_date: "2001-04-05".to_string(),
        runtime: 97,
        imdb_id: "tt0000001".to_string(),
        tmdb_id: 42,
        collection: None,
        genres: vec!["Drama".to_string()],
        cast: vec![Actor::new("X", 0, 0.0)],
        poster_url: "https://image.example/poster.jpg".to_string(),
    }
}

fn frontmatter(note: &str) -> serde_yaml::Value {
    let rest = note.strip_prefix("---\n").unwrap();
    let end = rest.find("\n---\n").unwrap();
    serde_yaml::from_str(&rest[..end]).unwrap()
}

#[tokio::test]
async fn creates_note_stubs_and_poster() {
    let dir = TempDir::new().unwrap();
    let mut vault = empty_vault(dir.path());
    let downloader = StaticDownloader::default();

    vault.create_movie(&example_film(), &downloader).await.unwrap();

    let root = dir.path();
    assert!(root.join("movies/Example Film.md").is_file());
    assert!(root.join("actors/X.md").is_file());
    assert!(root.join("genres/Drama.md").is_file());
    assert_eq!(
        fs::read(root.join("attachments/Example Film.jpg")).unwrap(),
        POSTER_BYTES
    );
    assert_eq!(fs::read_to_string(root.join("actors/X.md")).unwrap(), "");
    assert_eq!(
        *downloader.requested.lock().unwrap(),
        vec!["https://image.example/poster.jpg".to_string()]
    );

    let note = fs::read_to_string(root.join("movies/Example Film.md")).unwrap();
    let fm = frontmatter(&note);
    assert_eq!(fm["owned"].as_bool(), Some(false));
    assert_eq!(fm["imdb_id"].as_str(), Some("tt0000001"));
    assert_eq!(fm["tmdb_id"].as_u64(), Some(42));
    let playlists: Vec<String> = serde_yaml::from_value(fm["playlists"].clone()).unwrap();
    assert_eq!(playlists, vec!["[[Newly Added]]"]);

    assert!(note.contains("![[Example Film.jpg]]"));
    assert!(note.contains("# Example Film (2001)"));
    assert!(note.contains("- **Cast:** [[X]]"));
    assert!(note.contains("- **Genres:** [[Drama]]"));
    assert!(note.contains("https://m.imdb.com/title/tt0000001"));
    assert!(note.contains("https://www.themoviedb.org/movie/42"));
    assert!(!note.contains("**Collection:**"));
}

#[tokio::test]
async fn sanitizes_title_and_collection() {
    let dir = TempDir::new().unwrap();
    let mut vault = empty_vault(dir.path());
    let movie = Movie {
        title: "Star Wars: Episode IV".to_string(),
        collection: Some("Star Wars: Original Trilogy".to_string()),
        ..example_film()
    };

    vault
        .create_movie(&movie, &StaticDownloader::default())
        .await
        .unwrap();

    let note_path = dir.path().join("movies/Star Wars - Episode IV.md");
    assert!(note_path.is_file());
    assert!(dir
        .path()
        .join("attachments/Star Wars - Episode IV.jpg")
        .is_file());
    let note = fs::read_to_string(note_path).unwrap();
    assert!(note.contains("- **Collection:** [[Star Wars - Original Trilogy]]"));
}

#[tokio::test]
async fn filters_cast_against_known_actors() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("actors")).unwrap();
    fs::write(dir.path().join("actors/B.md"), "").unwrap();
    let mut vault = empty_vault(dir.path());

    let movie = Movie {
        cast: vec![
            Actor::new("A", 0, 0.1),
            Actor::new("B", 15, 0.2),
            Actor::new("C", 20, 2.0),
            Actor::new("D", 25, 0.3),
        ],
        ..example_film()
    };

    vault
        .create_movie(&movie, &StaticDownloader::default())
        .await
        .unwrap();

    let actors = dir.path().join("actors");
    assert!(actors.join("A.md").exists());
    assert!(actors.join("B.md").exists());
    assert!(actors.join("C.md").exists());
    assert!(!actors.join("D.md").exists());

    let note = fs::read_to_string(dir.path().join("movies/Example Film.md")).unwrap();
    assert!(note.contains("- **Cast:** [[A]], [[B]], [[C]]\n"));
}

#[tokio::test]
async fn actors_created_earlier_in_the_run_count_as_known() {
    let dir = TempDir::new().unwrap();
    let mut vault = empty_vault(dir.path());
    let downloader = StaticDownloader::default();

    let first = Movie {
        title: "First".to_string(),
        cast: vec![Actor::new("Character Actor", 2, 0.4)],
        ..example_film()
    };
    let second = Movie {
        title: "Second".to_string(),
        cast: vec![Actor::new("Character Actor", 30, 0.4)],
        ..example_film()
    };

    vault.create_movie(&first, &downloader).await.unwrap();
    assert!(vault.known_actors().contains("Character Actor"));
    assert!(vault.known_genres().contains("Drama"));

    vault.create_movie(&second, &downloader).await.unwrap();

    let note = fs::read_to_string(dir.path().join("movies/Second.md")).unwrap();
    assert!(note.contains("- **Cast:** [[Character Actor]]"));
}

#[tokio::test]
async fn same_sanitized_title_overwrites() {
    let dir = TempDir::new().unwrap();
    let mut vault = empty_vault(dir.path());
    let downloader = StaticDownloader::default();

    let original = Movie {
        title: "Solaris".to_string(),
        release_date: "1972-03-20".to_string(),
        ..example_film()
    };
    let remake = Movie {
        title: "Solaris.".to_string(),
        release_date: "2002-11-27".to_string(),
        ..example_film()
    };

    vault.create_movie(&original, &downloader).await.unwrap();
    vault.create_movie(&remake, &downloader).await.unwrap();

    let entries = fs::read_dir(dir.path().join("movies")).unwrap().count();
    assert_eq!(entries, 1);
    let note = fs::read_to_string(dir.path().join("movies/Solaris.md")).unwrap();
    assert!(note.contains("# Solaris (2002)"));
}

#[tokio::test]
async fn genre_failure_leaves_earlier_files_and_no_note() {
    let dir = TempDir::new().unwrap();
    let mut vault = empty_vault(dir.path());
    let movie = Movie {
        // The slash points into a directory that does not exist
        genres: vec!["Drama".to_string(), "Sci/Fi".to_string()],
        ..example_film()
    };

    let err = vault
        .create_movie(&movie, &StaticDownloader::default())
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::Io { op: "create genre", .. }));
    assert!(dir.path().join("genres/Drama.md").exists());
    assert!(dir.path().join("actors/X.md").exists());
    assert!(dir.path().join("attachments/Example Film.jpg").exists());
    assert!(!dir.path().join("movies/Example Film.md").exists());
}

#[tokio::test]
async fn invalid_release_date_fails_render() {
    let dir = TempDir::new().unwrap();
    let mut vault = empty_vault(dir.path());
    let movie = Movie {
        release_date: String::new(),
        ..example_film()
    };

    let err = vault
        .create_movie(&movie, &StaticDownloader::default())
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::Render(_)));
    assert!(err.to_string().starts_with("render note:"));
}

#[tokio::test]
async fn missing_attachments_dir_fails_before_stubs() {
    let dir = TempDir::new().unwrap();
    let mut vault = Vault::load_with_observer(dir.path(), Arc::new(NoopObserver)).unwrap();

    let err = vault
        .create_movie(&example_film(), &StaticDownloader::default())
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::Io { op: "download poster", .. }));
    assert!(vault.known_actors().is_empty());
}

#[tokio::test]
async fn downloads_poster_over_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t/p/original/poster.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(POSTER_BYTES.to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut vault = empty_vault(dir.path());
    let movie = Movie {
        poster_url: format!("{}/t/p/original/poster.jpg", mock_server.uri()),
        ..example_film()
    };

    vault
        .create_movie(&movie, &HttpDownloader::new())
        .await
        .unwrap();

    assert_eq!(
        fs::read(dir.path().join("attachments/Example Film.jpg")).unwrap(),
        POSTER_BYTES
    );
}

#[tokio::test]
async fn failed_download_writes_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut vault = empty_vault(dir.path());
    let movie = Movie {
        poster_url: format!("{}/poster.jpg", mock_server.uri()),
        ..example_film()
    };

    let err = vault
        .create_movie(&movie, &HttpDownloader::new())
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::Download(DownloadError::Status { .. })));
    for sub in ["attachments", "movies", "actors", "genres"] {
        let count = fs::read_dir(dir.path().join(sub)).unwrap().count();
        assert_eq!(count, 0, "{sub} should be empty");
    }
}
