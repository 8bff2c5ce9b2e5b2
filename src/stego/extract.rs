//! Reading a terminated bitstream back out of an image.

use image::RgbImage;
use log::debug;

use super::bits::{Bitstream, GROUP_BITS, TERMINATOR_BITS};
use super::channels::Planes;
use super::error::StegoError;
use super::traversal::Traversal;

/// Collects LSBs in traversal order until the terminator is seen.
///
/// The terminator is only recognised on a 32-bit group boundary, and is
/// stripped from the result.
pub fn extract(image: &RgbImage) -> Result<Bitstream, StegoError> {
    let (width, height) = image.dimensions();
    let planes = Planes::from_image(image);
    let mut bits = Bitstream::new();

    for loc in Traversal::new(width, height) {
        bits.push(planes.byte(loc) & 1 == 1);

        if bits.len() % GROUP_BITS == 0 && bits.ends_with_terminator() {
            let payload_len = bits.len() - TERMINATOR_BITS;
            bits.truncate(payload_len);
            debug!("Found terminator after {} payload bits", payload_len);
            return Ok(bits);
        }
    }

    Err(StegoError::TerminatorNotFound {
        scanned: bits.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::bits::{decode_text, encode_text};
    use crate::stego::embed::embed;
    use image::Rgb;

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
    fn test_embed_extract_roundtrip() {
        let image = create_test_image(32, 32);
        let payload = encode_text("Hello, steganography!");

        let stego = embed(&image, &payload).unwrap();
        let extracted = extract(&stego).unwrap();

        assert_eq!(extracted, payload);
        assert_eq!(decode_text(&extracted).unwrap(), "Hello, steganography!");
    }

    #[test]
    fn test_exactly_full_image_roundtrip() {
        // 8x4x3 = 96 bits: 64 payload bits, then terminator as the final 32
        let image = create_test_image(8, 4);
        let payload: Bitstream = (0..64).map(|i| i % 3 == 0).collect();

        let stego = embed(&image, &payload).unwrap();
        assert_eq!(extract(&stego).unwrap(), payload);
    }

    #[test]
    fn test_empty_payload_roundtrip() {
        let image = create_test_image(8, 8);
        let stego = embed(&image, &Bitstream::new()).unwrap();
        assert!(extract(&stego).unwrap().is_empty());
    }

    #[test]
    fn test_no_payload_image() {
        // Every LSB is zero, so no run of ones can appear
        let image = RgbImage::from_pixel(10, 10, Rgb([128, 64, 32]));
        assert_eq!(
            extract(&image),
            Err(StegoError::TerminatorNotFound { scanned: 300 })
        );
    }

    #[test]
    fn test_unaligned_ones_run_is_ignored() {
        // Bits 16..48 are ones: a 32-long run that straddles two groups.
        let image = RgbImage::from_fn(4, 4, |_, _| Rgb([0, 1, 1]));
        assert_eq!(
            extract(&image),
            Err(StegoError::TerminatorNotFound { scanned: 48 })
        );
    }

    #[test]
    fn test_empty_image() {
        let image = RgbImage::new(0, 0);
        assert_eq!(
            extract(&image),
            Err(StegoError::TerminatorNotFound { scanned: 0 })
        );
    }
}
