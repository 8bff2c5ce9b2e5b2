//! Steganography error types.

use thiserror::Error;

/// Errors that can occur while embedding into or extracting from an image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// The terminated payload does not fit into the carrier.
    #[error("Message too long for carrier image: need {needed} bits, capacity is {capacity} bits")]
    CapacityExceeded {
        /// Payload bits including the terminator.
        needed: usize,
        /// Bits available in the image.
        capacity: usize,
    },

    /// The payload does not consist of whole 32-bit groups, so the extractor
    /// could never find the terminator after it.
    #[error("Payload of {len} bits is not a whole number of 32-bit groups")]
    UnalignedPayload {
        /// Payload length in bits.
        len: usize,
    },

    /// The whole image was scanned without finding the end-of-payload marker.
    #[error("No hidden message found: terminator missing after {scanned} bits")]
    TerminatorNotFound {
        /// Number of bits read before giving up.
        scanned: usize,
    },

    /// Channel planes do not agree with the requested image size.
    #[error("Plane dimensions do not match: expected {expected:?}, {channel} plane is {actual:?}")]
    DimensionMismatch {
        /// Name of the offending channel.
        channel: &'static str,
        /// Requested (width, height).
        expected: (u32, u32),
        /// The plane's (width, height).
        actual: (u32, u32),
    },
}
