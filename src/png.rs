use log::debug;

use crate::{
    chunks::ihdr::IHDRChunk,
    encoder::PNGEncoder,
    error::Result,
    image_data::{compress_data, BEST_COMPRESSION},
    raster::RasterImage,
};

/// Largest data length a single chunk may declare.
pub const MAX_CHUNK_LENGTH: usize = (1 << 31) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// zlib level, 0 (stored) to 10. Defaults to 9.
    pub compression_level: u8,
    /// Compressed data beyond this many bytes continues in another IDAT chunk.
    pub max_idat_size: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            compression_level: BEST_COMPRESSION,
            max_idat_size: 1 << 20,
        }
    }
}

/// Turns RGB rasters into 8-bit truecolor, non-interlaced PNG files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    options: EncoderOptions,
}

impl Encoder {
    pub fn new(options: EncoderOptions) -> Self {
        Self { options }
    }

    pub fn encode(&self, image: &RasterImage) -> Result<Vec<u8>> {
        image.validate()?;
        let header = IHDRChunk::truecolor(image.width(), image.height());
        let compressed = compress_data(image.pixels(), &header, self.options.compression_level);
        let max_idat_size = self.options.max_idat_size.clamp(1, MAX_CHUNK_LENGTH);
        let idat_count = compressed.len().div_ceil(max_idat_size);
        debug!(
            "Compressed {}x{} image into {} bytes across {} IDAT chunk(s)",
            image.width(),
            image.height(),
            compressed.len(),
            idat_count
        );

        let capacity = 8 + 25 + compressed.len() + 12 * idat_count + 12;
        Ok(PNGEncoder::with_capacity(capacity)
            .write_header(&header)
            .write_image_data(&compressed, max_idat_size)
            .finish())
    }
}

/// Encodes with [`EncoderOptions::default`].
pub fn encode(image: &RasterImage) -> Result<Vec<u8>> {
    Encoder::default().encode(image)
}
