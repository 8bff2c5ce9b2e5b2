//! Capacity command - show how much text an image can carry.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lsbvault::{Carrier, VaultError};

use super::CommandExecutor;

/// Show how long a message an image can hide.
#[derive(Args, Debug)]
pub struct CapacityCommand {
    /// Carrier image to inspect
    #[arg(short, long)]
    pub image: PathBuf,
}

impl CommandExecutor for CapacityCommand {
    fn execute(&self) -> Result<()> {
        let carrier = Carrier::from_file(&self.image)
            .map_err(VaultError::from)
            .with_context(|| format!("Failed to open {}", self.image.display()))?;

        println!("{}", carrier.capacity());
        Ok(())
    }
}
