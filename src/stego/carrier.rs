//! Loading and saving carrier images.
//!
//! Any decodable input is converted to 8-bit RGB; alpha is dropped and never
//! restored. Output is restricted to lossless formats because any
//! recompression would destroy the embedded bits.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage};
use log::{debug, warn};
use thiserror::Error;

use super::capacity::CapacityReport;

/// Lossless formats a stego image may be written as.
pub const LOSSLESS_EXTENSIONS: &[&str] = &["png", "bmp"];

/// Errors at the image file boundary.
#[derive(Error, Debug)]
pub enum CarrierError {
    #[error("Image load error: {0}")]
    ImageLoadError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Refusing to write lossy format for {0}: use .png or .bmp")]
    LossyOutput(String),
}

/// An RGB carrier image.
#[derive(Debug, Clone)]
pub struct Carrier {
    image: RgbImage,
}

impl Carrier {
    /// Opens an image file and converts it to RGB.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CarrierError> {
        let path = path.as_ref();
        let image =
            image::open(path).map_err(|e| CarrierError::ImageLoadError(e.to_string()))?;

        if matches!(ImageFormat::from_path(path), Ok(ImageFormat::Jpeg)) {
            warn!(
                "{} is a JPEG; it can serve as a carrier but a stego image must be saved losslessly",
                path.display()
            );
        }

        Self::from_dynamic(image)
    }

    /// Decodes an image from memory and converts it to RGB.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CarrierError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| CarrierError::ImageLoadError(e.to_string()))?;
        Self::from_dynamic(image)
    }

    /// Wraps an already decoded RGB image.
    pub fn from_image(image: RgbImage) -> Result<Self, CarrierError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CarrierError::EmptyImage { width, height });
        }
        Ok(Self { image })
    }

    fn from_dynamic(image: DynamicImage) -> Result<Self, CarrierError> {
        if image.color().has_alpha() {
            debug!("Dropping alpha channel from {:?} image", image.color());
        }
        Self::from_image(image.to_rgb8())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn capacity(&self) -> CapacityReport {
        CapacityReport::for_dimensions(self.width(), self.height())
    }

    /// Saves the image; the format follows the extension and must be lossless.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CarrierError> {
        save_lossless(&self.image, path.as_ref())
    }

    /// Returns the image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, CarrierError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| CarrierError::ImageSaveError(e.to_string()))?;
        Ok(bytes)
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

/// Writes `image` as PNG or BMP, chosen by the extension of `path`.
pub fn save_lossless(image: &RgbImage, path: &Path) -> Result<(), CarrierError> {
    let format =
        ImageFormat::from_path(path).map_err(|e| CarrierError::ImageSaveError(e.to_string()))?;

    if !matches!(format, ImageFormat::Png | ImageFormat::Bmp) {
        return Err(CarrierError::LossyOutput(path.display().to_string()));
    }

    image
        .save_with_format(path, format)
        .map_err(|e| CarrierError::ImageSaveError(e.to_string()))
}
