//! Splitting an RGB image into per-channel byte planes and back.

use image::{Rgb, RgbImage};

use super::error::StegoError;
use super::traversal::Location;

/// Channel names, indexed the same way as [`Location::channel`].
pub const CHANNEL_NAMES: [&str; 3] = ["red", "green", "blue"];

/// One colour channel of an image, one byte per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Plane {
    /// Creates a plane from row-major bytes.
    ///
    /// Returns `None` when `data` does not hold exactly `width * height` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the byte at (`row`, `col`).
    pub fn get(&self, row: u32, col: u32) -> u8 {
        self.data[self.offset(row, col)]
    }

    /// Returns a mutable reference to the byte at (`row`, `col`).
    pub fn get_mut(&mut self, row: u32, col: u32) -> &mut u8 {
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    fn has_dimensions(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

/// Projects an image into its red, green and blue planes.
pub fn split(image: &RgbImage) -> (Plane, Plane, Plane) {
    let (width, height) = image.dimensions();
    let pixels = width as usize * height as usize;

    let mut red = Vec::with_capacity(pixels);
    let mut green = Vec::with_capacity(pixels);
    let mut blue = Vec::with_capacity(pixels);

    // enumerate_pixels walks rows top to bottom, so the planes come out row-major
    for (_, _, Rgb([r, g, b])) in image.enumerate_pixels() {
        red.push(*r);
        green.push(*g);
        blue.push(*b);
    }

    let plane = |data| Plane {
        width,
        height,
        data,
    };
    (plane(red), plane(green), plane(blue))
}

/// Reassembles a 3-channel image from its planes.
pub fn merge(
    red: &Plane,
    green: &Plane,
    blue: &Plane,
    height: u32,
    width: u32,
) -> Result<RgbImage, StegoError> {
    for (plane, channel) in [red, green, blue].into_iter().zip(CHANNEL_NAMES) {
        if !plane.has_dimensions(width, height) {
            return Err(StegoError::DimensionMismatch {
                channel,
                expected: (width, height),
                actual: (plane.width, plane.height),
            });
        }
    }

    Ok(RgbImage::from_fn(width, height, |col, row| {
        Rgb([
            red.get(row, col),
            green.get(row, col),
            blue.get(row, col),
        ])
    }))
}

/// The three planes of one image, addressable by [`Location`].
#[derive(Debug, Clone)]
pub struct Planes {
    planes: [Plane; 3],
}

impl Planes {
    /// Splits `image` into its planes.
    pub fn from_image(image: &RgbImage) -> Self {
        let (red, green, blue) = split(image);
        Self {
            planes: [red, green, blue],
        }
    }

    /// Merges the planes back into an image.
    pub fn to_image(&self) -> Result<RgbImage, StegoError> {
        let [red, green, blue] = &self.planes;
        merge(red, green, blue, red.height, red.width)
    }

    /// Returns the byte at `loc`.
    pub fn byte(&self, loc: Location) -> u8 {
        self.planes[loc.channel].get(loc.row, loc.col)
    }

    /// Returns a mutable reference to the byte at `loc`.
    pub fn byte_mut(&mut self, loc: Location) -> &mut u8 {
        self.planes[loc.channel].get_mut(loc.row, loc.col)
    }

    pub fn channel(&self, index: usize) -> &Plane {
        &self.planes[index]
    }
}
