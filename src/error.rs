use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between reading a PPM and producing a PNG.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported PPM format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported max value: {0}")]
    UnsupportedMaxValue(String),

    #[error("Malformed dimensions line: {0:?}")]
    MalformedDimensions(String),

    #[error("Malformed PPM header: {0}")]
    MalformedHeader(String),

    #[error("Malformed sample: {0:?}")]
    MalformedSample(String),

    /// Width or height is zero, or too large to be stored in a PNG.
    #[error("Unsupported image dimensions {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Expected {expected} pixel bytes but found {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid PNG chunk: {0}")]
    InvalidChunk(String),

    #[error("Failed to format report date: {0}")]
    DateFormat(#[from] time::error::Format),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
