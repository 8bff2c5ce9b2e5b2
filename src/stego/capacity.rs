//! How much text fits into a carrier image.

use std::fmt;

use crate::crypto::{token_len, TOKEN_OVERHEAD};

use super::bits::{GROUP_BITS, TERMINATOR_BITS};
use super::traversal::capacity_bits;

/// Embedding capacity of an image of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityReport {
    pub width: u32,
    pub height: u32,
    /// One bit per channel byte.
    pub capacity_bits: usize,
    /// Token characters that fit alongside the terminator.
    pub max_token_chars: usize,
    /// Largest UTF-8 plaintext, in bytes, whose token still fits.
    pub max_plaintext_bytes: usize,
}

impl CapacityReport {
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        let capacity_bits = capacity_bits(width, height);
        let max_token_chars = capacity_bits.saturating_sub(TERMINATOR_BITS) / GROUP_BITS;

        // Padded base64 spends 4 characters on every 3 raw bytes.
        let max_raw_bytes = (max_token_chars / 4) * 3;
        let max_plaintext_bytes = max_raw_bytes.saturating_sub(TOKEN_OVERHEAD);

        Self {
            width,
            height,
            capacity_bits,
            max_token_chars,
            max_plaintext_bytes,
        }
    }

    /// Whether a plaintext of `len` bytes would fit.
    pub fn fits_plaintext(&self, len: usize) -> bool {
        bits_needed(len) <= self.capacity_bits
    }
}

/// Bits embedded for a plaintext of `plaintext_len` bytes, terminator included.
pub fn bits_needed(plaintext_len: usize) -> usize {
    token_len(plaintext_len) * GROUP_BITS + TERMINATOR_BITS
}

impl fmt::Display for CapacityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image:          {}x{} pixels", self.width, self.height)?;
        writeln!(f, "Capacity:       {} bits", self.capacity_bits)?;
        writeln!(f, "Token length:   up to {} characters", self.max_token_chars)?;
        write!(f, "Message length: up to {} bytes of UTF-8 text", self.max_plaintext_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_bits() {
        let report = CapacityReport::for_dimensions(100, 100);
        assert_eq!(report.capacity_bits, 30_000);
        // (30000 - 32) / 32 = 936 characters
        assert_eq!(report.max_token_chars, 936);
        // 936 / 4 * 3 = 702 raw bytes, minus 37 bytes of framing
        assert_eq!(report.max_plaintext_bytes, 665);
    }

    #[test]
    fn test_max_plaintext_is_tight() {
        for (w, h) in [(40, 40), (64, 31), (100, 100), (17, 250)] {
            let report = CapacityReport::for_dimensions(w, h);
            assert!(report.fits_plaintext(report.max_plaintext_bytes));
            assert!(!report.fits_plaintext(report.max_plaintext_bytes + 1));
        }
    }

    #[test]
    fn test_tiny_image() {
        let report = CapacityReport::for_dimensions(2, 2);
        assert_eq!(report.capacity_bits, 12);
        assert_eq!(report.max_token_chars, 0);
        assert_eq!(report.max_plaintext_bytes, 0);
        assert!(!report.fits_plaintext(0));
    }
}
