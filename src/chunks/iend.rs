use std::borrow::Cow;

use super::ParseableChunk;

pub struct IENDChunk;
impl<'a> ParseableChunk<'a> for IENDChunk {
    const HEADER: &'static [u8; 4] = b"IEND";

    fn from_bytes(chunk_data: &'a [u8]) -> nom::IResult<&'a [u8], Self> {
        Ok((chunk_data, Self))
    }

    fn data(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&[])
    }
}
