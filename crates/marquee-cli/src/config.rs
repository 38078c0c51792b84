use crate::cli::LogLevel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Vault configuration
    #[serde(default)]
    pub vault: VaultConfig,
    /// TMDB configuration
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Network configuration
    #[serde(default)]
    pub network: NetworkConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Vault configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Root of the vault
    pub path: PathBuf,
}

/// TMDB configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// API read access token (can also be set via environment)
    pub access_token: Option<String>,

    /// API root
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
}

/// Network configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when neither `--log-level` nor `--verbose` is given
    pub level: Option<LogLevel>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: default_tmdb_base_url(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(30),
        }
    }
}

fn default_tmdb_base_url() -> String {
    marquee_tmdb::DEFAULT_BASE_URL.to_string()
}

impl CliConfig {
    /// Load configuration with precedence: defaults < file < env < args
    pub fn load(config_file: Option<PathBuf>, vault_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::from_file_or_default(config_file)?;

        // Override with env vars
        if let Ok(path) = std::env::var("MARQUEE_VAULT_PATH") {
            config.vault.path = PathBuf::from(path);
        }
        if let Ok(token) = std::env::var("TMDB_ACCESS_TOKEN") {
            config.tmdb.access_token = Some(token);
        }
        if let Ok(timeout) = std::env::var("MARQUEE_TIMEOUT") {
            let secs = timeout.trim().parse().with_context(|| {
                format!("Invalid MARQUEE_TIMEOUT {timeout:?}: expected whole seconds")
            })?;
            config.network.timeout_secs = Some(secs);
        }

        // Override with CLI args (highest priority)
        if let Some(path) = vault_path {
            config.vault.path = path;
        }

        Ok(config)
    }

    /// Get default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("marquee");
        Ok(config_dir.join("config.toml"))
    }

    /// Request timeout; `None` means no timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.network
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// TMDB token, empty when unset
    pub fn tmdb_access_token(&self) -> &str {
        self.tmdb.access_token.as_deref().unwrap_or_default()
    }

    /// Load config from an explicit file, the user's config file, or defaults
    fn from_file_or_default(config_file: Option<PathBuf>) -> Result<Self> {
        let path = match config_file {
            Some(path) => Some(path),
            // Test mode never reads the user's own config
            None if std::env::var("MARQUEE_TEST_MODE").is_ok() => None,
            None => Self::default_config_path()
                .ok()
                .filter(|path| path.exists()),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
