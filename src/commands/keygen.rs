//! Key generation command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lsbvault::crypto::SecretKey;
use lsbvault::VaultError;

use super::CommandExecutor;

/// Generate a new random key file.
///
/// Share the file with the other party over a secure channel. Both sides can
/// compare fingerprints to confirm they hold the same key.
#[derive(Args, Debug)]
pub struct KeygenCommand {
    /// Output path for the key file
    #[arg(short, long, default_value = "lsbvault.key")]
    pub output: PathBuf,

    /// Overwrite the key file if it already exists
    #[arg(long)]
    pub force: bool,
}

impl CommandExecutor for KeygenCommand {
    fn execute(&self) -> Result<()> {
        let key = SecretKey::generate();
        key.save(&self.output, self.force)
            .map_err(VaultError::from)
            .with_context(|| format!("Failed to save key to {}", self.output.display()))?;

        println!("Key generated successfully:");
        println!("  Key file:    {}", self.output.display());
        println!("  Fingerprint: {}", key.fingerprint());
        println!();
        println!("Use it with: lsbvault hide --key-file {} ...", self.output.display());
        println!("Keep this file secret!");

        Ok(())
    }
}
