//! Symmetric key type and key file handling.
//!
//! Keys are 32 random bytes. On disk they are stored as base64 wrapped in a
//! PEM-style header; a bare base64 line is accepted too, so a key pasted from
//! another tool or an environment variable works unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key length in bytes.
pub const KEY_SIZE: usize = 32;

/// Environment variable holding a base64 key.
pub const KEY_ENV: &str = "LSBVAULT_KEY";

/// Environment variable holding a key file path.
pub const KEY_FILE_ENV: &str = "LSBVAULT_KEY_FILE";

const KEY_HEADER: &str = "-----BEGIN LSBVAULT SECRET KEY-----";
const KEY_FOOTER: &str = "-----END LSBVAULT SECRET KEY-----";

/// HKDF info for the key fingerprint. Independent of the cipher's subkey.
const FINGERPRINT_INFO: &[u8] = b"LSBVAULT-V1-FINGERPRINT";

/// Errors that can occur while loading or parsing a key.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("No key provided: use --key-file, --key, LSBVAULT_KEY_FILE or LSBVAULT_KEY")]
    MissingKey,

    #[error("Invalid key file format: {0}")]
    InvalidFormat(String),

    #[error("Invalid key length: expected 32 bytes, got {got}")]
    InvalidKeyLength { got: usize },

    #[error("Key is not valid base64")]
    InvalidBase64,

    #[error("Refusing to overwrite existing key file {0}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A 256-bit symmetric secret. Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; KEY_SIZE],
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("fingerprint", &self.fingerprint())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl SecretKey {
    /// Generates a new random key from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    /// Parses a base64 key, accepting URL-safe or standard alphabets with or
    /// without padding.
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let encoded = encoded.trim();
        let mut decoded = [URL_SAFE, URL_SAFE_NO_PAD, STANDARD, STANDARD_NO_PAD]
            .iter()
            .find_map(|engine| engine.decode(encoded).ok())
            .ok_or(KeyError::InvalidBase64)?;

        if decoded.len() != KEY_SIZE {
            let got = decoded.len();
            decoded.zeroize();
            return Err(KeyError::InvalidKeyLength { got });
        }

        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self { bytes })
    }

    /// URL-safe base64 with padding.
    pub fn to_base64(&self) -> String {
        URL_SAFE.encode(self.bytes)
    }

    /// A short identifier that is safe to share, for checking that both sides
    /// hold the same key.
    pub fn fingerprint(&self) -> String {
        let hk = Hkdf::<Sha256>::new(None, &self.bytes);
        let mut digest = [0u8; 8];
        // 8 bytes is always a valid HKDF-SHA256 output length
        if hk.expand(FINGERPRINT_INFO, &mut digest).is_err() {
            return String::from("unavailable");
        }
        digest
            .chunks(2)
            .map(|pair| format!("{:02X}{:02X}", pair[0], pair[1]))
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Encodes the key in the PEM-style key file format.
    pub fn to_pem(&self) -> String {
        format!("{}\n{}\n{}\n", KEY_HEADER, self.to_base64(), KEY_FOOTER)
    }

    /// Parses a key file's contents, armored or bare base64.
    pub fn from_pem(content: &str) -> Result<Self, KeyError> {
        let content = content.trim();

        if !content.starts_with("-----") {
            return Self::from_base64(content);
        }

        let body = content
            .strip_prefix(KEY_HEADER)
            .and_then(|rest| rest.trim_end().strip_suffix(KEY_FOOTER))
            .ok_or_else(|| {
                KeyError::InvalidFormat(format!("expected {} ... {}", KEY_HEADER, KEY_FOOTER))
            })?;

        let joined: String = body.split_whitespace().collect();
        if joined.is_empty() {
            return Err(KeyError::InvalidFormat("empty key body".to_string()));
        }
        Self::from_base64(&joined)
    }

    /// Reads a key file.
    pub fn load(path: &Path) -> Result<Self, KeyError> {
        let content = fs::read_to_string(path)?;
        Self::from_pem(&content)
    }

    /// Writes the key file, refusing to replace an existing file unless
    /// `overwrite` is set. On Unix the file is made owner-only.
    pub fn save(&self, path: &Path, overwrite: bool) -> Result<(), KeyError> {
        if path.exists() && !overwrite {
            return Err(KeyError::AlreadyExists(path.to_path_buf()));
        }

        fs::write(path, self.to_pem())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }
}

/// Picks the key from a key file if one is given, else from inline base64.
pub fn resolve_key(key_file: Option<&Path>, key: Option<&str>) -> Result<SecretKey, KeyError> {
    match (key_file, key) {
        (Some(path), _) => SecretKey::load(path),
        (None, Some(encoded)) => SecretKey::from_base64(encoded),
        (None, None) => Err(KeyError::MissingKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generated_keys_differ() {
        let a = SecretKey::generate();
        let b = SecretKey::generate();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_base64_roundtrip() {
        let key = SecretKey::generate();
        let parsed = SecretKey::from_base64(&key.to_base64()).unwrap();
        assert_eq!(key.as_bytes(), parsed.as_bytes());
    }

    #[test]
    fn test_accepts_fernet_style_key() {
        let key = SecretKey::from_base64("rnIvkv2UkRPM03bWBTTDjrAB3hyhMEz0fB1rnOqvB_I=").unwrap();
        assert_eq!(key.as_bytes().len(), KEY_SIZE);
    }

    #[test]
    fn test_accepts_standard_alphabet_without_padding() {
        let key = SecretKey::from_bytes([0xFB; KEY_SIZE]);
        let encoded = STANDARD_NO_PAD.encode(key.as_bytes());
        assert!(encoded.contains('+') || encoded.contains('/'));
        let parsed = SecretKey::from_base64(&encoded).unwrap();
        assert_eq!(parsed.as_bytes(), key.as_bytes());
    }

    #[test]
    fn test_wrong_length_rejected() {
        let short = URL_SAFE.encode([1u8; 16]);
        assert!(matches!(
            SecretKey::from_base64(&short),
            Err(KeyError::InvalidKeyLength { got: 16 })
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            SecretKey::from_base64("not a key!"),
            Err(KeyError::InvalidBase64)
        ));
    }

    #[test]
    fn test_pem_roundtrip() {
        let key = SecretKey::generate();
        let pem = key.to_pem();
        assert!(pem.starts_with(KEY_HEADER));

        let parsed = SecretKey::from_pem(&pem).unwrap();
        assert_eq!(key.as_bytes(), parsed.as_bytes());
    }

    #[test]
    fn test_pem_with_wrong_header() {
        let pem = "-----BEGIN SOMETHING-----\nAAAA\n-----END SOMETHING-----\n";
        assert!(matches!(
            SecretKey::from_pem(pem),
            Err(KeyError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.key");

        let key = SecretKey::generate();
        key.save(&path, false).unwrap();
        let loaded = SecretKey::load(&path).unwrap();
        assert_eq!(key.as_bytes(), loaded.as_bytes());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.key");

        SecretKey::generate().save(&path, false).unwrap();
        assert!(matches!(
            SecretKey::generate().save(&path, false),
            Err(KeyError::AlreadyExists(_))
        ));
        assert!(SecretKey::generate().save(&path, true).is_ok());
    }

    #[test]
    fn test_fingerprint_is_stable_and_distinct() {
        let key = SecretKey::from_bytes([7; KEY_SIZE]);
        assert_eq!(key.fingerprint(), key.clone().fingerprint());
        assert_eq!(key.fingerprint().len(), 19);
        assert_ne!(
            key.fingerprint(),
            SecretKey::from_bytes([8; KEY_SIZE]).fingerprint()
        );
    }

    #[test]
    fn test_debug_redacts_bytes() {
        let key = SecretKey::from_bytes([0xAB; KEY_SIZE]);
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("171, 171"));
    }

    #[test]
    fn test_resolve_prefers_key_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.key");
        let file_key = SecretKey::generate();
        file_key.save(&path, false).unwrap();
        let inline = SecretKey::generate().to_base64();

        let resolved = resolve_key(Some(&path), Some(&inline)).unwrap();
        assert_eq!(resolved.as_bytes(), file_key.as_bytes());

        let resolved = resolve_key(None, Some(&inline)).unwrap();
        assert_eq!(resolved.to_base64(), inline);

        assert!(matches!(resolve_key(None, None), Err(KeyError::MissingKey)));
    }
}
