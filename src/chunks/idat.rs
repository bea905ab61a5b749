use std::borrow::Cow;

use super::ParseableChunk;
use nom::IResult;

#[derive(Debug)]
pub struct IDATChunk<'a> {
    pub data: &'a [u8],
}
impl<'a> IDATChunk<'a> {
    /// Spreads a zlib stream over consecutive IDAT chunks of at most
    /// `max_size` bytes each.
    pub(crate) fn split(stream: &'a [u8], max_size: usize) -> impl Iterator<Item = Self> {
        stream.chunks(max_size.max(1)).map(|data| IDATChunk { data })
    }
}
impl<'a> ParseableChunk<'a> for IDATChunk<'a> {
    const HEADER: &'static [u8; 4] = b"IDAT";

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        Ok((&chunk_data[0..0], IDATChunk { data: chunk_data }))
    }

    fn data(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.data)
    }
}
