//! Hide command - embed an encrypted message in a carrier image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use log::info;

use lsbvault::hide_file;

use super::{CommandExecutor, KeyArgs};

/// Hide a text message in an image.
///
/// The message is encrypted, then written into the least significant bits
/// of the carrier. The output must be PNG or BMP: lossy formats destroy the
/// hidden bits.
#[derive(Args, Debug)]
pub struct HideCommand {
    /// Carrier image (.png, .jpg, .jpeg or .bmp)
    #[arg(short, long)]
    pub image: PathBuf,

    /// Text file with the message to hide (.txt)
    #[arg(short, long)]
    pub message: PathBuf,

    /// Where to write the stego image (.png or .bmp)
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub key: KeyArgs,
}

impl CommandExecutor for HideCommand {
    fn execute(&self) -> Result<()> {
        let cipher = self.key.cipher()?;

        let hidden = hide_file(&self.image, &self.message, &self.output, &cipher)
            .with_context(|| format!("Failed to hide message in {}", self.image.display()))?;

        info!(
            "Token of {} characters embedded, {:.1}% of capacity used",
            hidden.token_len,
            hidden.bits_embedded as f64 * 100.0 / hidden.capacity as f64
        );
        println!("Message hidden successfully in {}", self.output.display());

        Ok(())
    }
}
