//! Recovering a hidden message from a stego image.
//!
//! This module orchestrates the extraction process:
//! 1. Read LSBs in traversal order up to the terminator
//! 2. Decode the 32-bit groups back into the token text
//! 3. Authenticate and decrypt the token
//!
//! Every step fails loudly: an image without a payload, a corrupted payload
//! and a wrong key are reported as distinct errors.

use std::path::Path;
use std::time::Duration;

use image::RgbImage;
use log::{debug, info};

use crate::crypto::Cipher;
use crate::error::VaultError;
use crate::paths::{require_extension, require_input, write_text, STEGO_EXTENSIONS, TEXT_EXTENSIONS};
use crate::stego::{decode_text, extract, Carrier};

/// Result of revealing a message.
#[derive(Debug, Clone)]
pub struct RevealedMessage {
    /// The decrypted message.
    pub message: String,
    /// Length of the recovered token in characters.
    pub token_len: usize,
    /// Payload bits read, terminator excluded.
    pub bits_read: usize,
}

/// Configuration for the decoder.
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    /// Reject messages encrypted longer ago than this.
    pub max_age: Option<Duration>,
}

/// Extracts and decrypts the message hidden in `image`.
pub fn reveal_message(image: &RgbImage, cipher: &Cipher) -> Result<RevealedMessage, VaultError> {
    reveal_message_with_config(image, cipher, &DecoderConfig::default())
}

/// Extracts and decrypts the message hidden in `image`, applying `config`.
pub fn reveal_message_with_config(
    image: &RgbImage,
    cipher: &Cipher,
    config: &DecoderConfig,
) -> Result<RevealedMessage, VaultError> {
    let bits = extract(image)?;
    let token = decode_text(&bits)?;
    debug!("Recovered {} token characters from {} bits", token.len(), bits.len());

    let plaintext = match config.max_age {
        Some(max_age) => cipher.decrypt_with_ttl(&token, max_age)?,
        None => cipher.decrypt(&token)?,
    };
    let message = String::from_utf8(plaintext).map_err(|_| VaultError::InvalidUtf8)?;

    Ok(RevealedMessage {
        message,
        token_len: token.len(),
        bits_read: bits.len(),
    })
}

/// Reveals the message hidden in the image at `image_path` and writes it to
/// `output_path`.
pub fn reveal_file(
    image_path: &Path,
    output_path: &Path,
    cipher: &Cipher,
    config: &DecoderConfig,
) -> Result<RevealedMessage, VaultError> {
    require_input(image_path, STEGO_EXTENSIONS, "Stego image")?;
    require_extension(output_path, TEXT_EXTENSIONS, "Output file")?;

    let carrier = Carrier::from_file(image_path)?;
    let revealed = reveal_message_with_config(carrier.image(), cipher, config)?;
    write_text(output_path, &revealed.message)?;

    info!(
        "Recovered {} characters from {} into {}",
        revealed.message.chars().count(),
        image_path.display(),
        output_path.display()
    );

    Ok(revealed)
}
