//! Authenticated encryption of messages into textual tokens.
//!
//! A token is URL-safe base64 (with padding) over:
//!
//! ```text
//! version (1) || issued_at (8, big-endian unix seconds) || nonce (12) || ciphertext + tag
//! ```
//!
//! The version byte and timestamp are bound to the ciphertext as associated
//! data, so tampering with any byte fails authentication. The ChaCha20-Poly1305
//! key is derived from the caller's secret with HKDF-SHA256.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::URL_SAFE, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    ChaCha20Poly1305, Nonce,
};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

use super::key::{SecretKey, KEY_SIZE};

/// Current token format version.
pub const TOKEN_VERSION: u8 = 0x01;

/// Nonce size for ChaCha20Poly1305.
pub const NONCE_SIZE: usize = 12;

/// Poly1305 tag size.
pub const TAG_SIZE: usize = 16;

const TIMESTAMP_SIZE: usize = 8;
const HEADER_SIZE: usize = 1 + TIMESTAMP_SIZE;

/// Raw (pre-base64) bytes a token adds on top of the plaintext.
pub const TOKEN_OVERHEAD: usize = HEADER_SIZE + NONCE_SIZE + TAG_SIZE;

/// How far in the future a token's timestamp may lie before a TTL check
/// rejects it.
pub const MAX_CLOCK_SKEW: Duration = Duration::from_secs(60);

const HKDF_SALT: &[u8] = b"LSBVAULT-V1-SALT";
const HKDF_INFO: &[u8] = b"LSBVAULT-V1-TOKEN";

/// Errors that can occur while creating or opening a token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// The token is not syntactically a token.
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Wrong key, or the token was altered.
    #[error("Authentication failed: wrong key or tampered message")]
    AuthenticationFailed,

    /// The token is older than the allowed age (or dated in the future).
    #[error("Token expired: issued at {issued_at}, now {now}, max age {max_age}s")]
    TokenExpired {
        issued_at: u64,
        now: u64,
        max_age: u64,
    },

    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Key derivation failed")]
    KeyDerivationFailed,

    #[error("System clock is before the unix epoch")]
    ClockError,
}

/// Encrypts and decrypts tokens under one key.
///
/// The key is supplied by the caller; nothing is read from global state.
pub struct Cipher {
    aead: ChaCha20Poly1305,
    fingerprint: String,
}

impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cipher")
            .field("key_fingerprint", &self.fingerprint)
            .finish()
    }
}

impl Cipher {
    pub fn new(key: &SecretKey) -> Result<Self, CipherError> {
        let subkey = derive_token_key(key)?;
        let aead = ChaCha20Poly1305::new_from_slice(&subkey[..])
            .map_err(|_| CipherError::KeyDerivationFailed)?;
        Ok(Self {
            aead,
            fingerprint: key.fingerprint(),
        })
    }

    /// Fingerprint of the key this cipher was built from.
    pub fn key_fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Encrypts `plaintext` with a fresh random nonce, stamped with the
    /// current time.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        self.encrypt_at_time(plaintext, unix_now()?)
    }

    /// Encrypts `plaintext` with an explicit issue timestamp.
    pub fn encrypt_at_time(&self, plaintext: &[u8], issued_at: u64) -> Result<String, CipherError> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);

        let header = token_header(issued_at);
        let ciphertext = self
            .aead
            .encrypt(
                Nonce::from_slice(&nonce_bytes),
                Payload {
                    msg: plaintext,
                    aad: &header,
                },
            )
            .map_err(|_| CipherError::EncryptionFailed)?;

        let mut raw = Vec::with_capacity(TOKEN_OVERHEAD + plaintext.len());
        raw.extend_from_slice(&header);
        raw.extend_from_slice(&nonce_bytes);
        raw.extend_from_slice(&ciphertext);

        Ok(URL_SAFE.encode(raw))
    }

    /// Decrypts a token. No output is produced unless authentication passes.
    pub fn decrypt(&self, token: &str) -> Result<Vec<u8>, CipherError> {
        self.open(token).map(|(_, plaintext)| plaintext)
    }

    /// Decrypts a token, additionally rejecting it if it is older than
    /// `max_age` or dated more than [`MAX_CLOCK_SKEW`] into the future.
    pub fn decrypt_with_ttl(&self, token: &str, max_age: Duration) -> Result<Vec<u8>, CipherError> {
        self.decrypt_with_ttl_at_time(token, max_age, unix_now()?)
    }

    /// [`Cipher::decrypt_with_ttl`] against an explicit current time.
    pub fn decrypt_with_ttl_at_time(
        &self,
        token: &str,
        max_age: Duration,
        now: u64,
    ) -> Result<Vec<u8>, CipherError> {
        let (issued_at, plaintext) = self.open(token)?;

        let too_old = issued_at.saturating_add(max_age.as_secs()) < now;
        let from_future = issued_at > now.saturating_add(MAX_CLOCK_SKEW.as_secs());
        if too_old || from_future {
            return Err(CipherError::TokenExpired {
                issued_at,
                now,
                max_age: max_age.as_secs(),
            });
        }

        Ok(plaintext)
    }

    /// Returns the authenticated issue timestamp of a token.
    pub fn issued_at(&self, token: &str) -> Result<u64, CipherError> {
        self.open(token).map(|(issued_at, _)| issued_at)
    }

    fn open(&self, token: &str) -> Result<(u64, Vec<u8>), CipherError> {
        let raw = URL_SAFE
            .decode(token)
            .map_err(|e| CipherError::MalformedToken(format!("invalid base64: {}", e)))?;

        if raw.len() < TOKEN_OVERHEAD {
            return Err(CipherError::MalformedToken(format!(
                "{} bytes is shorter than the {} byte minimum",
                raw.len(),
                TOKEN_OVERHEAD
            )));
        }

        let (header, rest) = raw.split_at(HEADER_SIZE);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_SIZE);

        let plaintext = self
            .aead
            .decrypt(
                Nonce::from_slice(nonce_bytes),
                Payload {
                    msg: ciphertext,
                    aad: header,
                },
            )
            .map_err(|_| CipherError::AuthenticationFailed)?;

        // The header is authenticated, so these fields are exactly what the
        // encrypting side wrote.
        if header[0] != TOKEN_VERSION {
            return Err(CipherError::MalformedToken(format!(
                "unsupported token version 0x{:02X}",
                header[0]
            )));
        }
        let mut stamp = [0u8; TIMESTAMP_SIZE];
        stamp.copy_from_slice(&header[1..HEADER_SIZE]);

        Ok((u64::from_be_bytes(stamp), plaintext))
    }
}

/// Length in characters of the token produced for a plaintext of
/// `plaintext_len` bytes.
pub fn token_len(plaintext_len: usize) -> usize {
    (TOKEN_OVERHEAD + plaintext_len).div_ceil(3) * 4
}

fn token_header(issued_at: u64) -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    header[0] = TOKEN_VERSION;
    header[1..].copy_from_slice(&issued_at.to_be_bytes());
    header
}

fn derive_token_key(key: &SecretKey) -> Result<Zeroizing<[u8; KEY_SIZE]>, CipherError> {
    let hk = Hkdf::<Sha256>::new(Some(HKDF_SALT), key.as_bytes());
    let mut subkey = Zeroizing::new([0u8; KEY_SIZE]);
    hk.expand(HKDF_INFO, &mut subkey[..])
        .map_err(|_| CipherError::KeyDerivationFailed)?;
    Ok(subkey)
}

fn unix_now() -> Result<u64, CipherError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| CipherError::ClockError)
}
