use anyhow::{Context, Result};
use marquee_core::Vault;

use crate::config::CliConfig;

/// Create the vault root and its `attachments`, `movies`, `actors` and
/// `genres` directories. Existing directories and notes are left alone.
pub fn execute(config: CliConfig) -> Result<()> {
    let root = &config.vault.path;

    let vault = Vault::load(root)
        .with_context(|| format!("init vault: {}", root.display()))?;
    vault
        .ensure_layout()
        .with_context(|| format!("init vault: {}", root.display()))?;

    println!("Initialized vault at {}", root.display());
    println!(
        "  {} actors, {} genres already present",
        vault.known_actors().len(),
        vault.known_genres().len()
    );

    Ok(())
}
