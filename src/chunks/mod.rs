//! PNG chunk framing.
//!
//! Every chunk is `length || type || data || crc`, where the CRC covers the
//! type and data. Chunk kinds implement [`ParseableChunk`] and share the
//! framing code here. [`iter_chunks`] walks an encoded stream and checks each
//! CRC; it never touches pixel data.

use std::borrow::Cow;

use nom::{
    bytes::complete::{tag, take},
    combinator::{map, map_res},
    multi::length_data,
    number::complete::be_u32,
    sequence::pair,
    IResult,
};

use crate::error::{Error, Result};

mod crc;
pub mod idat;
pub mod iend;
pub mod ihdr;

use crc::chunk_crc;

pub const SIGNATURE: &[u8; 8] = b"\x89PNG\x0d\x0a\x1a\x0a";

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug)]
pub enum Chunk<'a> {
    IHDR(ihdr::IHDRChunk),
    IDAT(idat::IDATChunk<'a>),
    IEND,
    Unknown(RawChunk<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct RawChunk<'a> {
    pub chunk_type: &'a [u8; 4],
    pub data: &'a [u8],
    pub crc: u32,
}

pub trait ParseableChunk<'a>: Sized {
    const HEADER: &'static [u8; 4];

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self>;

    /// The chunk's data field, without length, type or CRC.
    fn data(&self) -> Cow<'_, [u8]>;

    fn write_to(&self, out: &mut Vec<u8>) {
        write_chunk(out, Self::HEADER, &self.data());
    }

    fn to_bytes(&self) -> Vec<u8> {
        let data = self.data();
        let mut bytes = Vec::with_capacity(data.len() + 12);
        write_chunk(&mut bytes, Self::HEADER, &data);
        bytes
    }
}

/// Callers keep `data` below 2^31 bytes, the largest length a chunk may declare.
fn write_chunk(out: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    out.extend((data.len() as u32).to_be_bytes());
    out.extend(chunk_type);
    out.extend(data);
    out.extend(chunk_crc(chunk_type, data).to_be_bytes());
}

pub fn strip_signature(input: &[u8]) -> Result<&[u8]> {
    let (rest, _) = parse_signature(input).map_err(|_| {
        Error::InvalidChunk("input doesn't start with the PNG signature".to_owned())
    })?;
    Ok(rest)
}

fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(&SIGNATURE[..])(input)
}

/// Iterates over the chunks following the signature, stopping after IEND or
/// at the first malformed chunk.
pub fn iter_chunks(source: &[u8]) -> ChunkIter<'_> {
    ChunkIter {
        source,
        finished: false,
    }
}

pub struct ChunkIter<'a> {
    source: &'a [u8],
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = Result<Chunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match parse_chunk(self.source) {
            Ok((rest, chunk)) => {
                self.source = rest;
                if matches!(chunk, Chunk::IEND) {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn parse_chunk(input: &[u8]) -> Result<(&[u8], Chunk<'_>)> {
    let (rest, raw) = raw_chunk(input)
        .map_err(|e| Error::InvalidChunk(format!("truncated or malformed chunk: {e}")))?;
    let expected = chunk_crc(raw.chunk_type, raw.data);
    if raw.crc != expected {
        return Err(Error::InvalidChunk(format!(
            "CRC mismatch in {} chunk: expected {expected:#010x}, found {:#010x}",
            String::from_utf8_lossy(raw.chunk_type),
            raw.crc
        )));
    }
    let chunk = if raw.chunk_type == ihdr::IHDRChunk::HEADER {
        Chunk::IHDR(parse_data(raw.data)?)
    } else if raw.chunk_type == idat::IDATChunk::HEADER {
        Chunk::IDAT(parse_data(raw.data)?)
    } else if raw.chunk_type == iend::IENDChunk::HEADER {
        parse_data::<iend::IENDChunk>(raw.data)?;
        Chunk::IEND
    } else {
        Chunk::Unknown(raw)
    };
    Ok((rest, chunk))
}

fn parse_data<'a, C: ParseableChunk<'a>>(data: &'a [u8]) -> Result<C> {
    let invalid = |reason: String| {
        Error::InvalidChunk(format!(
            "bad {} data: {reason}",
            String::from_utf8_lossy(C::HEADER)
        ))
    };
    let (rest, chunk) = C::from_bytes(data).map_err(|e| invalid(e.to_string()))?;
    if !rest.is_empty() {
        return Err(invalid(format!("{} trailing bytes", rest.len())));
    }
    Ok(chunk)
}

fn raw_chunk(input: &[u8]) -> IResult<&[u8], RawChunk<'_>> {
    let header_length = 4;
    let (input, (type_and_data, crc)) = pair(
        length_data(map(be_u32, |length| {
            (length as usize).saturating_add(header_length)
        })),
        be_u32,
    )(input)?;
    let (data, chunk_type) =
        map_res(take(header_length), <&[u8; 4]>::try_from)(type_and_data)?;
    Ok((
        input,
        RawChunk {
            chunk_type,
            data,
            crc,
        },
    ))
}
