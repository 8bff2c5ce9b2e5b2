//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod capacity;
mod extract;
mod hide;
mod keygen;

pub use capacity::CapacityCommand;
pub use extract::ExtractCommand;
pub use hide::HideCommand;
pub use keygen::KeygenCommand;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use log::debug;

use lsbvault::crypto::{resolve_key, Cipher, KEY_ENV, KEY_FILE_ENV};

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self) -> Result<()>;
}

/// Where to find the symmetric key. Shared by `hide` and `extract`.
///
/// A key file wins over an inline key when both are present.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Path to a key file created by `lsbvault keygen`
    #[arg(long, env = KEY_FILE_ENV)]
    pub key_file: Option<PathBuf>,

    /// Base64-encoded 32-byte key (prefer --key-file: arguments are visible to other users)
    #[arg(long, env = KEY_ENV, hide_env_values = true)]
    pub key: Option<String>,
}

impl KeyArgs {
    /// Resolves the key and builds a cipher around it.
    pub fn cipher(&self) -> Result<Cipher> {
        let key = resolve_key(self.key_file.as_deref(), self.key.as_deref())
            .map_err(lsbvault::VaultError::from)
            .context("Failed to load key")?;
        let cipher = Cipher::new(&key)
            .map_err(lsbvault::VaultError::from)
            .context("Failed to initialise cipher")?;
        debug!("Using key {}", cipher.key_fingerprint());
        Ok(cipher)
    }
}
