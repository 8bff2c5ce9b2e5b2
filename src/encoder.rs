//! Hiding a message in a carrier image.
//!
//! This module orchestrates the hiding process:
//! 1. Encrypt the message into a textual token
//! 2. Encode the token as 32-bit character groups
//! 3. Append the terminator and embed into the image LSBs
//! 4. Reassemble the image for lossless saving

use std::path::Path;

use image::RgbImage;
use log::{debug, info};

use crate::crypto::Cipher;
use crate::error::VaultError;
use crate::paths::{
    read_text, require_extension, require_input, CARRIER_EXTENSIONS, STEGO_EXTENSIONS,
    TEXT_EXTENSIONS,
};
use crate::stego::{
    capacity_bits, embed, encode_text, save_lossless, Carrier, TERMINATOR_BITS,
};

/// Result of hiding a message.
#[derive(Debug, Clone)]
pub struct HiddenMessage {
    /// The carrier with the message embedded.
    pub image: RgbImage,
    /// Length of the encrypted token in characters.
    pub token_len: usize,
    /// Bits written, terminator included.
    pub bits_embedded: usize,
    /// Total bits the carrier could hold.
    pub capacity: usize,
}

/// Encrypts `message` and embeds it into a copy of `image`.
///
/// Fails with `CapacityExceeded` before touching any pixel if the encrypted
/// message does not fit.
pub fn hide_message(
    image: &RgbImage,
    message: &str,
    cipher: &Cipher,
) -> Result<HiddenMessage, VaultError> {
    let token = cipher.encrypt(message.as_bytes())?;
    let payload = encode_text(&token);
    debug!(
        "Message of {} bytes encrypted to {} token characters ({} bits)",
        message.len(),
        token.len(),
        payload.len()
    );

    let stego = embed(image, &payload)?;

    Ok(HiddenMessage {
        image: stego,
        token_len: token.len(),
        bits_embedded: payload.len() + TERMINATOR_BITS,
        capacity: capacity_bits(image.width(), image.height()),
    })
}

/// Hides the text of `message_path` in the image at `carrier_path` and writes
/// the result to `output_path`.
pub fn hide_file(
    carrier_path: &Path,
    message_path: &Path,
    output_path: &Path,
    cipher: &Cipher,
) -> Result<HiddenMessage, VaultError> {
    require_input(carrier_path, CARRIER_EXTENSIONS, "Carrier image")?;
    require_input(message_path, TEXT_EXTENSIONS, "Message file")?;
    require_extension(output_path, STEGO_EXTENSIONS, "Output image")?;

    let carrier = Carrier::from_file(carrier_path)?;
    let message = read_text(message_path)?;

    let hidden = hide_message(carrier.image(), &message, cipher)?;
    save_lossless(&hidden.image, output_path)?;

    info!(
        "Hid {} characters in {} ({} of {} bits used)",
        message.chars().count(),
        output_path.display(),
        hidden.bits_embedded,
        hidden.capacity
    );

    Ok(hidden)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SecretKey;
    use crate::stego::{Planes, StegoError, Traversal};
    use image::Rgb;

    fn cipher() -> Cipher {
        Cipher::new(&SecretKey::from_bytes([9; 32])).unwrap()
    }

    fn create_test_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
            ])
        })
    }

    #[test]
    fn test_hide_reports_usage() {
        let image = create_test_image(64, 64);
        let hidden = hide_message(&image, "hello", &cipher()).unwrap();

        assert_eq!(hidden.capacity, 64 * 64 * 3);
        assert_eq!(hidden.bits_embedded, hidden.token_len * 32 + 32);
        assert_eq!(hidden.image.dimensions(), (64, 64));
    }

    #[test]
    fn test_too_small_carrier_fails() {
        let image = create_test_image(8, 8);
        let result = hide_message(&image, "does not fit", &cipher());

        assert!(matches!(
            result,
            Err(VaultError::Stego(StegoError::CapacityExceeded { capacity: 192, .. }))
        ));
    }

    #[test]
    fn test_only_written_prefix_changes() {
        let image = create_test_image(64, 64);
        let hidden = hide_message(&image, "short note", &cipher()).unwrap();

        let before = Planes::from_image(&image);
        let after = Planes::from_image(&hidden.image);
        let changed_past_prefix = Traversal::new(64, 64)
            .skip(hidden.bits_embedded)
            .any(|loc| before.byte(loc) != after.byte(loc));
        assert!(!changed_past_prefix);
    }
}
