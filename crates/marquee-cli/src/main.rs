use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use marquee_cli::{
    cli::{Cli, Commands},
    commands,
    config::CliConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration with CLI overrides
    let config = CliConfig::load(cli.config.clone(), cli.command.dir())?;

    // Initialize logging; RUST_LOG still wins when set
    let env_filter = EnvFilter::builder()
        .with_default_directive(cli.level_filter(config.logging.level).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    debug!("Using vault at {}", config.vault.path.display());

    match cli.command {
        Commands::New(args) => commands::new::execute(config, args).await?,
        Commands::Init { .. } => commands::init::execute(config)?,
    }

    Ok(())
}
