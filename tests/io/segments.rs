// Page loading and the segment-list helpers of the file layer

use std::io::Cursor;

use lzom::block::{compress_to_vec, BitstreamVersion, Dictionary};
use lzom::io::{compress_segments, decompress_growing, load_segments, write_segments};
use lzom::LzoError;

#[test]
fn pages_then_compress_matches_contiguous() {
    let data: Vec<u8> = b"paged input ".iter().cycle().take(9000).copied().collect();
    let pages = load_segments(Cursor::new(&data), 1024).unwrap();
    assert_eq!(pages.len(), 9);

    let mut dict = Dictionary::new();
    let (out, n) = compress_segments(&pages, 100, BitstreamVersion::V0, &mut dict).unwrap();
    assert!(out.iter().all(|p| p.len() <= 100));

    let mut flat = Vec::new();
    write_segments(&out, n, &mut flat).unwrap();
    assert_eq!(flat, compress_to_vec(&data, BitstreamVersion::V0).unwrap());
    assert_eq!(decompress_growing(&flat).unwrap(), data);
}

#[test]
fn growing_decoder_on_empty_and_garbage() {
    assert_eq!(decompress_growing(&[]).unwrap(), Vec::<u8>::new());
    assert_eq!(decompress_growing(&[17, 0]), Err(LzoError::InputOverrun));
}

#[test]
fn growing_decoder_gives_up_on_lookbehind() {
    assert_eq!(decompress_growing(&[0x40, 0x00, 17, 0, 0]), Err(LzoError::LookbehindOverrun));
}
