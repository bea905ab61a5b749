use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};

use crate::{chunks::ihdr::IHDRChunk, scanlines::filter_scanlines};

pub(crate) const BEST_COMPRESSION: u8 = CompressionLevel::BestCompression as u8;

/// Highest level miniz accepts.
pub(crate) const MAX_LEVEL: u8 = CompressionLevel::UberCompression as u8;

/// Filters the image into scanlines and wraps them in a zlib stream.
pub(crate) fn compress_data(image_data: &[u8], header: &IHDRChunk, level: u8) -> Vec<u8> {
    let data = filter_scanlines(image_data, header);
    compress_to_vec_zlib(&data, level.min(MAX_LEVEL))
}
