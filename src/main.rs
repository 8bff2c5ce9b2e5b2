//! lsbvault - hide encrypted messages in images
//!
//! A CLI tool for LSB steganography with authenticated encryption.

mod commands;

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;

use commands::{CapacityCommand, CommandExecutor, ExtractCommand, HideCommand, KeygenCommand};
use lsbvault::error::{VaultError, EXIT_FAILURE};

/// lsbvault - hide encrypted messages in images
///
/// Messages are sealed with ChaCha20-Poly1305 and written into the least
/// significant bits of a carrier image. Stego images must be kept lossless.
#[derive(Parser)]
#[command(name = "lsbvault")]
#[command(version)]
#[command(about = "Hide encrypted text messages in the least significant bits of images")]
#[command(long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message in an image
    Hide(HideCommand),

    /// Extract a hidden message from an image
    Extract(ExtractCommand),

    /// Generate a new key file
    Keygen(KeygenCommand),

    /// Show how much text an image can hold
    Capacity(CapacityCommand),
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Maps a command failure to the process exit code of its root `VaultError`.
///
/// Context added by the commands is transparent to the lookup.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<VaultError>()
        .map(VaultError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match &cli.command {
        Commands::Hide(cmd) => cmd.execute(),
        Commands::Extract(cmd) => cmd.execute(),
        Commands::Keygen(cmd) => cmd.execute(),
        Commands::Capacity(cmd) => cmd.execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err) as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use anyhow::{anyhow, Context};
    use image::{Rgb, RgbImage};
    use lsbvault::crypto::{Cipher, SecretKey};
    use lsbvault::error::{EXIT_CAPACITY_EXCEEDED, EXIT_TERMINATOR_NOT_FOUND};
    use lsbvault::{hide_file, reveal_file, DecoderConfig};
    use tempfile::tempdir;

    fn cipher() -> Cipher {
        Cipher::new(&SecretKey::from_bytes([7; 32])).unwrap()
    }

    #[test]
    fn test_exit_code_survives_context() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("plain.png");
        RgbImage::from_pixel(16, 16, Rgb([10, 20, 30])).save(&image).unwrap();

        let output = dir.path().join("out.txt");
        let err = reveal_file(&image, &output, &cipher(), &DecoderConfig::default())
            .with_context(|| format!("Failed to extract message from {}", image.display()))
            .unwrap_err();

        assert_eq!(exit_code(&err), EXIT_TERMINATOR_NOT_FOUND);
    }

    #[test]
    fn test_capacity_failure_exit_code() {
        let dir = tempdir().unwrap();
        let carrier = dir.path().join("tiny.png");
        let message = dir.path().join("message.txt");
        RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])).save(&carrier).unwrap();
        fs::write(&message, "too long for four pixels").unwrap();

        let err = hide_file(&carrier, &message, &dir.path().join("out.png"), &cipher())
            .context("Failed to hide message")
            .unwrap_err();

        assert_eq!(exit_code(&err), EXIT_CAPACITY_EXCEEDED);
    }

    #[test]
    fn test_unrelated_error_is_generic_failure() {
        let err = anyhow!("something else").context("outer");
        assert_eq!(exit_code(&err), EXIT_FAILURE);
    }
}
