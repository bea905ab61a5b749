//! Reader for PPM images: `P3` (decimal samples) and `P6` (raw bytes), both
//! with a max value of 255.

use std::{borrow::Cow, fs, path::Path};

use log::debug;

use crate::{
    error::{Error, Result},
    raster::RasterImage,
};

mod header;

use header::{lossy, parse_header};

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];
const UTF16LE_BOM: &[u8] = &[0xff, 0xfe];
const UTF16BE_BOM: &[u8] = &[0xfe, 0xff];

/// How the samples after the header are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PpmFormat {
    /// `P3`
    Ascii,
    /// `P6`
    Binary,
}

impl PpmFormat {
    fn from_magic(magic: &[u8]) -> Result<Self> {
        match magic {
            b"P3" => Ok(Self::Ascii),
            b"P6" => Ok(Self::Binary),
            other => Err(Error::UnsupportedFormat(lossy(other))),
        }
    }

    fn decode_body(self, body: &[u8], expected: usize) -> Result<Vec<u8>> {
        let samples = match self {
            Self::Ascii => decode_ascii(body, expected)?,
            Self::Binary => body.to_vec(),
        };
        if samples.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(samples)
    }
}

pub fn read(path: impl AsRef<Path>) -> Result<RasterImage> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

pub fn parse(input: &[u8]) -> Result<RasterImage> {
    let input = strip_bom(input)?;
    let (body, header) = parse_header(&input)?;
    let expected = RasterImage::expected_len(header.width, header.height)?;
    let pixels = header.format.decode_body(body, expected)?;
    debug!(
        "Read {:?} PPM, {}x{}",
        header.format, header.width, header.height
    );
    Ok(RasterImage::new(header.width, header.height, pixels))
}

/// Drops a leading byte-order mark. Text after a UTF-16 mark is re-encoded as
/// UTF-8 so the rest of the reader only ever sees single-byte text.
fn strip_bom(input: &[u8]) -> Result<Cow<'_, [u8]>> {
    if let Some(rest) = input.strip_prefix(UTF8_BOM) {
        Ok(Cow::Borrowed(rest))
    } else if let Some(rest) = input.strip_prefix(UTF16LE_BOM) {
        transcode_utf16(rest, u16::from_le_bytes).map(Cow::Owned)
    } else if let Some(rest) = input.strip_prefix(UTF16BE_BOM) {
        transcode_utf16(rest, u16::from_be_bytes).map(Cow::Owned)
    } else {
        Ok(Cow::Borrowed(input))
    }
}

fn transcode_utf16(input: &[u8], decode_unit: fn([u8; 2]) -> u16) -> Result<Vec<u8>> {
    if input.len() % 2 != 0 {
        return Err(Error::MalformedHeader(
            "UTF-16 input has an odd number of bytes".to_owned(),
        ));
    }
    let units = input
        .chunks_exact(2)
        .map(|pair| decode_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map(String::into_bytes)
        .map_err(|e| Error::MalformedHeader(e.to_string()))
}

/// `P3` samples: decimal numbers separated by whitespace, `#` starts a
/// comment running to the end of the line.
fn decode_ascii(body: &[u8], expected: usize) -> Result<Vec<u8>> {
    let mut samples = Vec::with_capacity(expected.min(body.len()));
    for line in body.split(|&b| b == b'\n') {
        let content = match line.iter().position(|&b| b == b'#') {
            Some(comment) => &line[..comment],
            None => line,
        };
        for token in content
            .split(|b| b.is_ascii_whitespace())
            .filter(|token| !token.is_empty())
        {
            samples.push(parse_sample(token)?);
        }
    }
    Ok(samples)
}

fn parse_sample(token: &[u8]) -> Result<u8> {
    std::str::from_utf8(token)
        .ok()
        .filter(|text| text.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| Error::MalformedSample(lossy(token)))
}
