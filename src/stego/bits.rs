//! Fixed-width bit codec for text.
//!
//! Every character is written as one 32-bit big-endian group holding its
//! Unicode scalar value. Groups are concatenated in character order, so no
//! escaping or length prefix is needed.

use std::fmt;

use thiserror::Error;

/// Width of one encoded character, in bits.
pub const GROUP_BITS: usize = 32;

/// Length of the end-of-payload marker, in bits.
pub const TERMINATOR_BITS: usize = 32;

/// Errors that can occur while decoding a bitstream back into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Malformed bitstream: length {len} is not a multiple of {GROUP_BITS}")]
    MalformedBitstream { len: usize },

    #[error("Invalid code point 0x{value:08X} at character {index}")]
    InvalidCodePoint { value: u32, index: usize },
}

/// An ordered sequence of bits.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Bitstream {
    bits: Vec<bool>,
}

impl Bitstream {
    /// Creates an empty bitstream.
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Creates an empty bitstream with room for `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Creates a bitstream from raw bits.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Appends one bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Appends a 32-bit group, most significant bit first.
    pub fn push_group(&mut self, value: u32) {
        for shift in (0..GROUP_BITS).rev() {
            self.bits.push((value >> shift) & 1 == 1);
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Drops every bit past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }

    /// Returns true if the last [`TERMINATOR_BITS`] bits are all ones.
    pub fn ends_with_terminator(&self) -> bool {
        self.bits.len() >= TERMINATOR_BITS
            && self.bits[self.bits.len() - TERMINATOR_BITS..]
                .iter()
                .all(|&bit| bit)
    }

    /// Returns a copy of this bitstream followed by the all-ones terminator.
    pub fn terminated(&self) -> Bitstream {
        let mut bits = Vec::with_capacity(self.bits.len() + TERMINATOR_BITS);
        bits.extend_from_slice(&self.bits);
        bits.extend(std::iter::repeat(true).take(TERMINATOR_BITS));
        Bitstream { bits }
    }

    /// Reads the 32-bit group starting at bit `offset`.
    fn group_at(&self, offset: usize) -> u32 {
        self.bits[offset..offset + GROUP_BITS]
            .iter()
            .fold(0u32, |acc, &bit| (acc << 1) | bit as u32)
    }
}

impl fmt::Display for Bitstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Bitstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitstream")
            .field("len", &self.bits.len())
            .finish()
    }
}

impl FromIterator<bool> for Bitstream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

/// Encodes text as one 32-bit group per character.
pub fn encode_text(text: &str) -> Bitstream {
    let mut bits = Bitstream::with_capacity(text.chars().count() * GROUP_BITS);
    for ch in text.chars() {
        bits.push_group(ch as u32);
    }
    bits
}

/// Decodes a bitstream produced by [`encode_text`].
pub fn decode_text(bits: &Bitstream) -> Result<String, CodecError> {
    if bits.len() % GROUP_BITS != 0 {
        return Err(CodecError::MalformedBitstream { len: bits.len() });
    }

    let mut text = String::with_capacity(bits.len() / GROUP_BITS);
    for (index, offset) in (0..bits.len()).step_by(GROUP_BITS).enumerate() {
        let value = bits.group_at(offset);
        let ch = char::from_u32(value).ok_or(CodecError::InvalidCodePoint { value, index })?;
        text.push(ch);
    }
    Ok(text)
}
