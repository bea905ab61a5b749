use crate::chunks::ihdr::IHDRChunk;

/// Filter type 0: the row is stored unchanged.
pub(crate) const FILTER_NONE: u8 = 0;

/// Rows of raw pixel bytes, without filter-type bytes.
pub(crate) struct Scanlines<'a> {
    rows: std::slice::Chunks<'a, u8>,
}
impl<'a> Scanlines<'a> {
    pub(crate) fn new(image_data: &'a [u8], header: &IHDRChunk) -> Self {
        Self {
            rows: image_data.chunks(header.scanline_size() - 1),
        }
    }
}
impl<'a> Iterator for Scanlines<'a> {
    type Item = &'a [u8];
    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}

/// Prefixes every row with its filter-type byte and joins the rows into the
/// buffer that gets compressed into IDAT.
pub(crate) fn filter_scanlines(image_data: &[u8], header: &IHDRChunk) -> Vec<u8> {
    let mut data = Vec::with_capacity(header.scanline_size() * header.height as usize);
    for row in Scanlines::new(image_data, header) {
        data.push(FILTER_NONE);
        data.extend_from_slice(row);
    }
    data
}
