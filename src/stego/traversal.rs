//! Canonical visiting order for carrier bytes.
//!
//! Bits are laid out channel-major: every byte of the red plane (row by row,
//! left to right), then green, then blue. Both the embedder and the extractor
//! walk the image through [`Traversal`], so they always agree on bit order.

/// Number of colour channels carrying payload bits.
pub const CHANNELS: usize = 3;

/// Address of a single channel byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// 0 = red, 1 = green, 2 = blue.
    pub channel: usize,
    pub row: u32,
    pub col: u32,
}

/// Lazy iterator over every channel byte of a `width` x `height` image.
///
/// Internally a single index over the flattened (channel, row, column) space.
#[derive(Debug, Clone)]
pub struct Traversal {
    width: u32,
    plane_len: usize,
    next: usize,
    end: usize,
}

impl Traversal {
    pub fn new(width: u32, height: u32) -> Self {
        let plane_len = width as usize * height as usize;
        Self {
            width,
            plane_len,
            next: 0,
            end: plane_len * CHANNELS,
        }
    }

    /// Maps a flat index back to its location.
    fn locate(&self, index: usize) -> Location {
        let channel = index / self.plane_len;
        let within = index % self.plane_len;
        let width = self.width as usize;
        Location {
            channel,
            row: (within / width) as u32,
            col: (within % width) as u32,
        }
    }
}

impl Iterator for Traversal {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        if self.next >= self.end {
            return None;
        }
        let loc = self.locate(self.next);
        self.next += 1;
        Some(loc)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Location> {
        self.next = self.next.saturating_add(n).min(self.end);
        self.next()
    }
}

impl ExactSizeIterator for Traversal {}

/// Number of bits an image of the given size can carry.
pub fn capacity_bits(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}
