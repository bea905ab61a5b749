use crate::{
    chunks::ihdr::MAX_DIMENSION,
    error::{Error, Result},
    pixel::Pixel,
};

/// An 8-bit RGB image: `width * height` pixels, rows top to bottom, three
/// bytes per pixel and no row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wraps a pixel buffer as-is. Use [`RasterImage::validate`] (or just
    /// encode, which validates) to check it against the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: &[Pixel]) -> Self {
        let pixels = pixels.iter().flat_map(|pixel| pixel.to_bytes()).collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Byte length of an RGB buffer with these dimensions.
    pub fn expected_len(width: u32, height: u32) -> Result<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|count| count.checked_mul(3))
            .ok_or(Error::UnsupportedDimensions { width, height })
    }

    pub fn validate(&self) -> Result<()> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Error::UnsupportedDimensions { width, height });
        }
        let expected = Self::expected_len(width, height)?;
        if self.pixels.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }
}
