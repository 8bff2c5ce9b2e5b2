//! # lsbvault - encrypted messages in image LSBs
//!
//! lsbvault hides a text message in the least significant bits of an RGB
//! image and recovers it later. The message is sealed with authenticated
//! encryption first, so a wrong key or a damaged image is reported as an
//! error instead of producing garbage text.
//!
//! ## Overview
//!
//! - The message is encrypted into a URL-safe base64 **token**
//!   (ChaCha20-Poly1305, fresh nonce per message)
//! - Each token character becomes a **32-bit group** of its code point
//! - A run of **32 one-bits** marks the end of the payload
//! - Bits go into the LSBs **channel by channel** (all red bytes row by row,
//!   then green, then blue)
//! - The stego image must be saved **losslessly** (PNG or BMP)
//!
//! ## Example Usage
//!
//! ```rust
//! use image::{Rgb, RgbImage};
//! use lsbvault::crypto::{Cipher, SecretKey};
//! use lsbvault::{hide_message, reveal_message};
//!
//! let key = SecretKey::generate();
//! let cipher = Cipher::new(&key).unwrap();
//!
//! let carrier = RgbImage::from_pixel(64, 64, Rgb([120, 80, 40]));
//! let hidden = hide_message(&carrier, "meet at dawn", &cipher).unwrap();
//!
//! let revealed = reveal_message(&hidden.image, &cipher).unwrap();
//! assert_eq!(revealed.message, "meet at dawn");
//! ```
//!
//! ## Modules
//!
//! - [`crypto`]: key handling and token encryption
//! - [`stego`]: bit codec, channel planes, traversal, embedding, extraction
//! - [`encoder`]: the hiding pipeline
//! - [`decoder`]: the extraction pipeline

pub mod crypto;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod paths;
pub mod stego;

// Re-export commonly used types at the crate root
pub use crypto::{Cipher, CipherError, KeyError, SecretKey};
pub use decoder::{reveal_file, reveal_message, reveal_message_with_config, DecoderConfig, RevealedMessage};
pub use encoder::{hide_file, hide_message, HiddenMessage};
pub use error::VaultError;
pub use stego::{Bitstream, CapacityReport, Carrier, CarrierError, CodecError, StegoError};
