//! Crate-level error type.
//!
//! Each layer has its own error enum; [`VaultError`] gathers them so callers
//! can tell "no message" from "wrong key" from "image too small", and maps
//! each to a process exit code.

use std::path::PathBuf;

use thiserror::Error;

use crate::crypto::{CipherError, KeyError};
use crate::stego::{CarrierError, CodecError, StegoError};

/// Exit code for generic I/O, usage and key failures.
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CAPACITY_EXCEEDED: i32 = 2;
pub const EXIT_AUTHENTICATION_FAILED: i32 = 3;
pub const EXIT_TERMINATOR_NOT_FOUND: i32 = 4;
pub const EXIT_MALFORMED: i32 = 5;
pub const EXIT_TOKEN_EXPIRED: i32 = 6;
/// Internal invariant violation (EX_SOFTWARE).
pub const EXIT_INTERNAL: i32 = 70;

/// Errors from hiding or revealing a message.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error(transparent)]
    Stego(#[from] StegoError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Carrier(#[from] CarrierError),

    #[error("Decrypted message is not valid UTF-8")]
    InvalidUtf8,

    #[error("{what} does not exist: {}", .path.display())]
    MissingFile { what: &'static str, path: PathBuf },

    #[error("{what} must have one of the extensions [{}]: {}", .expected.join(", "), .path.display())]
    UnsupportedExtension {
        what: &'static str,
        path: PathBuf,
        expected: &'static [&'static str],
    },

    #[error("Could not {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VaultError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            VaultError::Stego(StegoError::CapacityExceeded { .. }) => EXIT_CAPACITY_EXCEEDED,
            VaultError::Stego(StegoError::TerminatorNotFound { .. }) => EXIT_TERMINATOR_NOT_FOUND,
            VaultError::Stego(StegoError::DimensionMismatch { .. })
            | VaultError::Stego(StegoError::UnalignedPayload { .. }) => EXIT_INTERNAL,
            VaultError::Cipher(CipherError::AuthenticationFailed) => EXIT_AUTHENTICATION_FAILED,
            VaultError::Cipher(CipherError::MalformedToken(_)) => EXIT_MALFORMED,
            VaultError::Cipher(CipherError::TokenExpired { .. }) => EXIT_TOKEN_EXPIRED,
            VaultError::Cipher(_) => EXIT_FAILURE,
            VaultError::Codec(_) | VaultError::InvalidUtf8 => EXIT_MALFORMED,
            VaultError::Key(_)
            | VaultError::Carrier(_)
            | VaultError::MissingFile { .. }
            | VaultError::UnsupportedExtension { .. }
            | VaultError::Io { .. } => EXIT_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_failure_kind() {
        let capacity: VaultError = StegoError::CapacityExceeded {
            needed: 10,
            capacity: 5,
        }
        .into();
        let auth: VaultError = CipherError::AuthenticationFailed.into();
        let missing: VaultError = StegoError::TerminatorNotFound { scanned: 3 }.into();
        let malformed: VaultError = CodecError::MalformedBitstream { len: 7 }.into();
        let unaligned: VaultError = StegoError::UnalignedPayload { len: 7 }.into();

        assert_eq!(capacity.exit_code(), EXIT_CAPACITY_EXCEEDED);
        assert_eq!(auth.exit_code(), EXIT_AUTHENTICATION_FAILED);
        assert_eq!(missing.exit_code(), EXIT_TERMINATOR_NOT_FOUND);
        assert_eq!(malformed.exit_code(), EXIT_MALFORMED);
        assert_eq!(unaligned.exit_code(), EXIT_INTERNAL);
    }

    #[test]
    fn test_messages_name_the_path() {
        let err = VaultError::UnsupportedExtension {
            what: "Message file",
            path: PathBuf::from("notes.md"),
            expected: &["txt"],
        };
        assert_eq!(
            err.to_string(),
            "Message file must have one of the extensions [txt]: notes.md"
        );
    }
}
