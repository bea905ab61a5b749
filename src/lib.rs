pub mod chunks;
pub mod convert;
pub mod encoder;
mod error;
mod image_data;
mod pixel;
mod png;
pub mod ppm;
mod raster;
mod scanlines;
pub mod viewer;

pub use error::{Error, Result};
pub use pixel::Pixel;
pub use png::{encode, Encoder, EncoderOptions, MAX_CHUNK_LENGTH};
pub use raster::RasterImage;
