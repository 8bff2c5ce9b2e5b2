//! LSB steganography over RGB images.
//!
//! - [`bits`]: fixed-width text codec and the [`Bitstream`] type
//! - [`channels`]: splitting images into byte planes and merging them back
//! - [`traversal`]: the channel, row, column visiting order
//! - [`embed`] / [`extract`]: writing and reading the terminated bitstream
//! - [`capacity`]: how much text an image can carry
//! - [`carrier`]: image file loading and lossless saving

pub mod bits;
pub mod capacity;
pub mod carrier;
pub mod channels;
pub mod embed;
pub mod error;
pub mod extract;
pub mod traversal;

pub use bits::{decode_text, encode_text, Bitstream, CodecError, GROUP_BITS, TERMINATOR_BITS};
pub use capacity::{bits_needed, CapacityReport};
pub use carrier::{save_lossless, Carrier, CarrierError, LOSSLESS_EXTENSIONS};
pub use channels::{merge, split, Plane, Planes};
pub use embed::embed;
pub use error::StegoError;
pub use extract::extract;
pub use traversal::{capacity_bits, Location, Traversal};
