//! Writing a bitstream into the least significant bits of an image.

use image::RgbImage;
use log::debug;

use super::bits::{Bitstream, GROUP_BITS};
use super::channels::Planes;
use super::error::StegoError;
use super::traversal::{capacity_bits, Traversal};

/// Embeds `payload` followed by the all-ones terminator into `image`.
///
/// The payload must be a whole number of 32-bit groups. Alignment and
/// capacity are checked before any byte is touched, so a failure leaves
/// nothing half-written. Bytes past the terminator keep their original value.
pub fn embed(image: &RgbImage, payload: &Bitstream) -> Result<RgbImage, StegoError> {
    if payload.len() % GROUP_BITS != 0 {
        return Err(StegoError::UnalignedPayload { len: payload.len() });
    }

    let (width, height) = image.dimensions();
    let framed = payload.terminated();
    let capacity = capacity_bits(width, height);

    if framed.len() > capacity {
        return Err(StegoError::CapacityExceeded {
            needed: framed.len(),
            capacity,
        });
    }

    let mut planes = Planes::from_image(image);
    for (loc, bit) in Traversal::new(width, height).zip(framed.iter()) {
        let byte = planes.byte_mut(loc);
        *byte = (*byte & 0xFE) | bit as u8;
    }

    debug!(
        "Embedded {} bits ({} payload + terminator) into {}x{} image, {} bits spare",
        framed.len(),
        payload.len(),
        width,
        height,
        capacity - framed.len()
    );

    planes.to_image()
}
