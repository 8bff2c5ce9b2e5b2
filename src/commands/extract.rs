//! Extract command - recover a hidden message from a stego image.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use lsbvault::{reveal_file, DecoderConfig};

use super::{CommandExecutor, KeyArgs};

/// Extract a hidden message from an image.
///
/// Fails with a distinct error (and exit code) when the image carries no
/// message, when the key is wrong, or when the payload is corrupted.
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// Stego image produced by `hide` (.png or .bmp)
    #[arg(short, long)]
    pub image: PathBuf,

    /// Where to write the recovered message (.txt)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Reject messages hidden more than this many seconds ago
    #[arg(long, value_name = "SECONDS")]
    pub max_age: Option<u64>,

    #[command(flatten)]
    pub key: KeyArgs,
}

impl CommandExecutor for ExtractCommand {
    fn execute(&self) -> Result<()> {
        let cipher = self.key.cipher()?;
        let config = DecoderConfig {
            max_age: self.max_age.map(Duration::from_secs),
        };

        reveal_file(&self.image, &self.output, &cipher, &config)
            .with_context(|| format!("Failed to extract message from {}", self.image.display()))?;

        println!("Message extracted successfully to {}", self.output.display());
        Ok(())
    }
}
