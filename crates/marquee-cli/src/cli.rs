use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Progress messages (default)
    Info,
    /// Debug messages, including why each cast member was kept
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "marquee")]
#[command(about = "marquee - build an Obsidian movie vault from TMDB metadata")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses config file value or defaults to 'info'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/marquee/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Effective log level: `--log-level`, then `--verbose`, then `configured`.
    pub fn level_filter(&self, configured: Option<LogLevel>) -> LevelFilter {
        self.log_level
            .or(self.verbose.then_some(LogLevel::Debug))
            .or(configured)
            .unwrap_or(LogLevel::Info)
            .into()
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new movie note
    New(NewArgs),

    /// Create the vault directories
    Init {
        /// The root of the vault (defaults to the configured vault path)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

impl Commands {
    /// Vault directory given on the command line, if any
    pub fn dir(&self) -> Option<PathBuf> {
        match self {
            Self::New(args) => args.dir.clone(),
            Self::Init { dir } => dir.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// The root of the vault (defaults to the configured vault path)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// The TMDB ID of the movie; overrides title
    #[arg(long)]
    pub id: Option<u64>,

    /// The title of the movie to add
    #[arg(long)]
    pub title: Option<String>,
}
