//! Cryptographic operations for lsbvault.
//!
//! This module provides:
//! - The 32-byte symmetric key type, key files and key resolution
//! - Authenticated encryption of messages into textual tokens
//!   (HKDF-SHA256 subkey + ChaCha20-Poly1305)

pub mod cipher;
pub mod key;

pub use cipher::{token_len, Cipher, CipherError, MAX_CLOCK_SKEW, TOKEN_OVERHEAD, TOKEN_VERSION};
pub use key::{resolve_key, KeyError, SecretKey, KEY_ENV, KEY_FILE_ENV, KEY_SIZE};
