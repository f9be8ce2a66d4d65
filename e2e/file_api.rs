//! E2E Test Suite 04: File API
//!
//! Whole files through `lzom::io`:
//! - a file larger than several compression blocks, paged at various sizes
//! - a highly compressible file whose decoded size far exceeds the initial
//!   output guess
//! - page loading from an arbitrary reader

extern crate lzom;

use std::fs;

use lzom::io::{compress_file, decompress_file, load_segments, FileOptions};
use lzom::BitstreamVersion;
use tempfile::TempDir;

fn big_sample() -> Vec<u8> {
    let mut out = Vec::with_capacity(300_000);
    let mut x = 0x1234_5678u32;
    while out.len() < 300_000 {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        match x % 4 {
            0 => out.extend(std::iter::repeat(0u8).take((x >> 20) as usize % 700)),
            1 => out.extend((0..64).map(|i| (x >> (i % 25)) as u8)),
            _ => out.extend_from_slice(b"records, records, more records; "),
        }
    }
    out
}

#[test]
fn test_large_file_various_pages() {
    let dir = TempDir::new().unwrap();
    let data = big_sample();
    let src = dir.path().join("big.bin");
    fs::write(&src, &data).unwrap();

    let mut first: Option<Vec<u8>> = None;
    for (i, segment_size) in [512usize, 4096, 65536, 1 << 20].into_iter().enumerate() {
        let opts = FileOptions { segment_size, version: BitstreamVersion::V1, overwrite: true };
        let packed = dir.path().join(format!("big.{i}.lzo"));
        let back = dir.path().join(format!("big.{i}.out"));
        compress_file(&src, &packed, &opts).unwrap();
        decompress_file(&packed, &back, &opts).unwrap();
        assert_eq!(fs::read(&back).unwrap(), data, "segment size {segment_size}");

        let bytes = fs::read(&packed).unwrap();
        match &first {
            None => first = Some(bytes),
            Some(f) => assert_eq!(&bytes, f, "segment size {segment_size}"),
        }
    }
}

#[test]
fn test_high_ratio_file_grows_output() {
    let dir = TempDir::new().unwrap();
    let data = vec![0u8; 1 << 20];
    let src = dir.path().join("zeros");
    let packed = dir.path().join("zeros.lzo");
    let back = dir.path().join("zeros.out");
    fs::write(&src, &data).unwrap();

    let opts = FileOptions { version: BitstreamVersion::V1, ..FileOptions::default() };
    let c = compress_file(&src, &packed, &opts).unwrap();
    assert!(c.bytes_out * 100 < c.bytes_in);
    assert!(c.ratio_percent() < 1.0);

    let d = decompress_file(&packed, &back, &opts).unwrap();
    assert_eq!(d.bytes_out, data.len() as u64);
    assert_eq!(fs::read(&back).unwrap(), data);
}

#[test]
fn test_load_segments_from_reader() {
    let data = big_sample();
    let pages = load_segments(std::io::Cursor::new(&data), 4096).unwrap();
    assert_eq!(pages.len(), (data.len() + 4095) / 4096);
    assert!(pages[..pages.len() - 1].iter().all(|p| p.len() == 4096));
    assert_eq!(pages.concat(), data);
}
