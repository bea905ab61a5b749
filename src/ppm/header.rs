use nom::{
    bytes::complete::take_till,
    character::complete::{char, space1, u32 as decimal},
    combinator::{all_consuming, map, opt},
    sequence::{separated_pair, terminated},
    IResult,
};

use super::PpmFormat;
use crate::error::{Error, Result};

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Header {
    pub(crate) format: PpmFormat,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

const SUPPORTED_MAX_VALUE: u32 = 255;

/// Parses the magic, dimensions and max-value lines. Returns the bytes
/// following the max-value line's terminator.
pub(crate) fn parse_header(input: &[u8]) -> Result<(&[u8], Header)> {
    let (input, magic) = line(input).map_err(|e| Error::MalformedHeader(e.to_string()))?;
    let format = PpmFormat::from_magic(magic)?;

    let (input, dimensions) = significant_line(input)
        .ok_or_else(|| Error::MalformedDimensions("missing dimensions line".to_owned()))?;
    let (_, (width, height)) = parse_dimensions(dimensions)
        .map_err(|_| Error::MalformedDimensions(lossy(dimensions)))?;

    let (input, max_value) = significant_line(input)
        .ok_or_else(|| Error::MalformedHeader("missing max value".to_owned()))?;
    let (_, max) = all_consuming(decimal)(max_value)
        .map_err(|_: nom::Err<nom::error::Error<&[u8]>>| {
            Error::MalformedHeader(format!("max value {:?} is not a number", lossy(max_value)))
        })?;
    if max != SUPPORTED_MAX_VALUE {
        return Err(Error::UnsupportedMaxValue(lossy(max_value)));
    }

    Ok((
        input,
        Header {
            format,
            width,
            height,
        },
    ))
}

/// One line without its `\n`, trimmed of surrounding whitespace (including a
/// trailing `\r`).
///
/// Header lines end only at `\n`. A P6 max value followed by a space or tab
/// instead of a newline runs into the binary body and is rejected.
fn line(input: &[u8]) -> IResult<&[u8], &[u8]> {
    map(
        terminated(take_till(|b: u8| b == b'\n'), opt(char('\n'))),
        <[u8]>::trim_ascii,
    )(input)
}

/// Next line that is neither blank nor a `#` comment.
fn significant_line(mut input: &[u8]) -> Option<(&[u8], &[u8])> {
    while !input.is_empty() {
        let (rest, content) = line(input).ok()?;
        input = rest;
        if !content.is_empty() && !content.starts_with(b"#") {
            return Some((rest, content));
        }
    }
    None
}

fn parse_dimensions(input: &[u8]) -> IResult<&[u8], (u32, u32)> {
    all_consuming(separated_pair(decimal, space1, decimal))(input)
}

pub(crate) fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
