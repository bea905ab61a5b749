use miniz_oxide::inflate::decompress_to_vec_zlib;
use ppm2png::chunks::{ihdr::ColorType, iter_chunks, strip_signature, Chunk, SIGNATURE};
use ppm2png::{encode, Encoder, EncoderOptions, Error, Pixel, RasterImage};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn chunks(png: &[u8]) -> Vec<Chunk<'_>> {
    iter_chunks(strip_signature(png).unwrap())
        .collect::<Result<_, _>>()
        .unwrap()
}

fn idat_stream(png: &[u8]) -> Vec<u8> {
    chunks(png)
        .iter()
        .filter_map(|chunk| match chunk {
            Chunk::IDAT(idat) => Some(idat.data),
            _ => None,
        })
        .flatten()
        .copied()
        .collect()
}

/// Inflates the IDAT data and drops each row's filter byte.
fn unfiltered_pixels(png: &[u8], width: usize) -> Vec<u8> {
    let scanlines = decompress_to_vec_zlib(&idat_stream(png)).unwrap();
    scanlines
        .chunks(width * 3 + 1)
        .flat_map(|scanline| {
            assert_eq!(scanline[0], 0, "only filter type 0 is written");
            scanline[1..].iter().copied()
        })
        .collect()
}

fn gradient(width: u32, height: u32) -> RasterImage {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).flat_map(move |x| [(x * 7) as u8, (y * 13) as u8, ((x ^ y) * 31) as u8])
        })
        .collect();
    RasterImage::new(width, height, pixels)
}

fn rgbw() -> RasterImage {
    RasterImage::from_pixels(
        2,
        2,
        &[
            Pixel::new(255, 0, 0),
            Pixel::new(0, 255, 0),
            Pixel::new(0, 0, 255),
            Pixel::new(255, 255, 255),
        ],
    )
}

#[test]
fn output_starts_with_signature() {
    for (width, height) in [(1, 1), (2, 2), (17, 3), (3, 40)] {
        let png = encode(&gradient(width, height)).unwrap();
        assert_eq!(&png[..8], SIGNATURE);
    }
}

#[test]
fn rgbw_header_and_trailer_bytes() {
    let png = encode(&rgbw()).unwrap();
    insta::assert_snapshot!(
        hex(&png[..33]),
        @"89504e470d0a1a0a0000000d4948445200000002000000020802000000fdd49a73"
    );
    insta::assert_snapshot!(hex(&png[png.len() - 12..]), @"0000000049454e44ae426082");
}

#[test]
fn rgbw_pixels_survive_the_round_trip() {
    let png = encode(&rgbw()).unwrap();
    let chunks = chunks(&png);
    assert_eq!(chunks.len(), 3);
    match &chunks[0] {
        Chunk::IHDR(header) => assert_eq!((header.width, header.height), (2, 2)),
        other => panic!("expected IHDR first, got {other:?}"),
    }
    assert!(matches!(chunks[1], Chunk::IDAT(_)));
    assert!(matches!(chunks[2], Chunk::IEND));
    assert_eq!(
        hex(&unfiltered_pixels(&png, 2)),
        "ff000000ff000000ffffffff"
    );
}

#[test]
fn header_describes_8_bit_truecolor() {
    for (width, height) in [(1, 1), (5, 9), (300, 2)] {
        let png = encode(&gradient(width, height)).unwrap();
        let chunks = chunks(&png);
        let Chunk::IHDR(header) = &chunks[0] else {
            panic!("first chunk isn't IHDR");
        };
        assert_eq!((header.width, header.height), (width, height));
        assert_eq!(header.bit_depth, 8);
        assert_eq!(header.color_type, ColorType::Truecolor);
        assert_eq!(header.compression_method, 0);
        assert_eq!(header.filter_method, 0);
    }
}

#[test]
fn pixels_survive_the_round_trip() {
    for (width, height) in [(1, 1), (3, 5), (64, 64), (101, 7)] {
        let image = gradient(width, height);
        let png = encode(&image).unwrap();
        let scanlines = decompress_to_vec_zlib(&idat_stream(&png)).unwrap();
        assert_eq!(
            scanlines.len(),
            height as usize * (1 + width as usize * 3)
        );
        assert_eq!(unfiltered_pixels(&png, width as usize), image.pixels());
    }
}

#[test]
fn encoding_is_deterministic() {
    let image = gradient(40, 30);
    assert_eq!(encode(&image).unwrap(), encode(&image).unwrap());
}

#[test]
fn flipped_bit_fails_the_crc() {
    let png = encode(&gradient(8, 8)).unwrap();
    // first byte of IHDR data, then first byte of IDAT data
    for offset in [16, 8 + 25 + 8] {
        for bit in 0..8 {
            let mut corrupt = png.clone();
            corrupt[offset] ^= 1 << bit;
            let first_error = iter_chunks(strip_signature(&corrupt).unwrap())
                .find_map(Result::err)
                .expect("corruption should be detected");
            assert!(matches!(first_error, Error::InvalidChunk(_)));
        }
    }
}

#[test]
fn smallest_image_encodes() {
    let png = encode(&RasterImage::new(1, 1, vec![10, 20, 30])).unwrap();
    assert_eq!(unfiltered_pixels(&png, 1), [10, 20, 30]);
}

#[test]
fn empty_dimensions_are_rejected() {
    for (width, height) in [(0, 1), (1, 0)] {
        assert!(matches!(
            encode(&RasterImage::new(width, height, vec![])),
            Err(Error::UnsupportedDimensions { .. })
        ));
    }
}

#[test]
fn short_pixel_buffer_is_rejected() {
    let mut pixels = gradient(4, 4).pixels().to_vec();
    pixels.truncate(40);
    assert!(matches!(
        encode(&RasterImage::new(4, 4, pixels)),
        Err(Error::BufferSizeMismatch {
            expected: 48,
            actual: 40
        })
    ));
}

#[test]
fn large_streams_are_split_across_idat_chunks() {
    let image = gradient(32, 32);
    let single = encode(&image).unwrap();
    let split = Encoder::new(EncoderOptions {
        max_idat_size: 64,
        ..Default::default()
    })
    .encode(&image)
    .unwrap();

    let idat_sizes: Vec<_> = chunks(&split)
        .iter()
        .filter_map(|chunk| match chunk {
            Chunk::IDAT(idat) => Some(idat.data.len()),
            _ => None,
        })
        .collect();
    assert!(idat_sizes.len() > 1);
    assert!(idat_sizes.iter().all(|&size| size <= 64));
    assert_eq!(idat_stream(&split), idat_stream(&single));
    assert_eq!(unfiltered_pixels(&split, 32), image.pixels());
}
