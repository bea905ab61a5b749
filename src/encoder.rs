//! Low-level PNG writer. The type parameter tracks which chunk comes next,
//! so chunks can only be written in the order IHDR, IDAT..., IEND.

use std::marker::PhantomData;

use crate::chunks::{
    idat::IDATChunk, iend::IENDChunk, ihdr::IHDRChunk, ParseableChunk, SIGNATURE,
};

pub struct PNGEncoder<State>(Vec<u8>, PhantomData<State>);

pub struct Start;
pub struct Header;
pub struct ImageData;

impl PNGEncoder<Start> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// `capacity` is a hint for the size of the finished file.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut bytes = Vec::with_capacity(capacity.max(SIGNATURE.len()));
        bytes.extend(SIGNATURE);
        Self(bytes, PhantomData)
    }

    pub fn write_header(mut self, header: &IHDRChunk) -> PNGEncoder<Header> {
        header.write_to(&mut self.0);
        PNGEncoder(self.0, PhantomData)
    }
}

impl Default for PNGEncoder<Start> {
    fn default() -> Self {
        Self::new()
    }
}

impl PNGEncoder<Header> {
    /// Writes an already compressed zlib stream as one or more IDAT chunks.
    pub fn write_image_data(
        mut self,
        compressed: &[u8],
        max_idat_size: usize,
    ) -> PNGEncoder<ImageData> {
        for chunk in IDATChunk::split(compressed, max_idat_size) {
            chunk.write_to(&mut self.0);
        }
        PNGEncoder(self.0, PhantomData)
    }
}

impl PNGEncoder<ImageData> {
    pub fn finish(mut self) -> Vec<u8> {
        IENDChunk.write_to(&mut self.0);
        self.0
    }
}
