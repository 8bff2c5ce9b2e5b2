//! Path checks for the file-to-file operations.

use std::fs;
use std::path::Path;

use crate::error::VaultError;

/// Formats accepted as a carrier when hiding.
pub const CARRIER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Formats a stego image may be read from or written to.
pub use crate::stego::LOSSLESS_EXTENSIONS as STEGO_EXTENSIONS;

/// Message input and output files.
pub const TEXT_EXTENSIONS: &[&str] = &["txt"];

/// Fails unless `path` ends in one of `expected` (case-insensitive).
pub fn require_extension(
    path: &Path,
    expected: &'static [&'static str],
    what: &'static str,
) -> Result<(), VaultError> {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| expected.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false);

    if matches {
        Ok(())
    } else {
        Err(VaultError::UnsupportedExtension {
            what,
            path: path.to_path_buf(),
            expected,
        })
    }
}

/// Fails unless `path` is an existing file with one of `expected` extensions.
pub fn require_input(
    path: &Path,
    expected: &'static [&'static str],
    what: &'static str,
) -> Result<(), VaultError> {
    if !path.is_file() {
        return Err(VaultError::MissingFile {
            what,
            path: path.to_path_buf(),
        });
    }
    require_extension(path, expected, what)
}

/// Reads a text file verbatim.
pub fn read_text(path: &Path) -> Result<String, VaultError> {
    fs::read_to_string(path).map_err(|source| VaultError::Io {
        action: "read",
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a text file verbatim.
pub fn write_text(path: &Path, text: &str) -> Result<(), VaultError> {
    fs::write(path, text).map_err(|source| VaultError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(require_extension(Path::new("a/photo.PNG"), STEGO_EXTENSIONS, "Image").is_ok());
        assert!(require_extension(Path::new("photo.Jpeg"), CARRIER_EXTENSIONS, "Image").is_ok());
    }

    #[test]
    fn test_wrong_or_missing_extension() {
        for path in ["photo.jpg", "photo", "photo.png.txt"] {
            let result = require_extension(Path::new(path), STEGO_EXTENSIONS, "Output image");
            assert!(
                matches!(result, Err(VaultError::UnsupportedExtension { .. })),
                "{} accepted",
                path
            );
        }
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let path: PathBuf = dir.path().join("message.txt");
        assert!(matches!(
            require_input(&path, TEXT_EXTENSIONS, "Message file"),
            Err(VaultError::MissingFile { .. })
        ));

        fs::write(&path, "hi").unwrap();
        assert!(require_input(&path, TEXT_EXTENSIONS, "Message file").is_ok());
    }

    #[test]
    fn test_text_is_read_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("m.txt");
        write_text(&path, "  line one\nline two\n\n").unwrap();
        assert_eq!(read_text(&path).unwrap(), "  line one\nline two\n\n");
    }
}
