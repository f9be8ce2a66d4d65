//! E2E Test Suite 05: Interoperability
//!
//! Classic (v0) streams are plain LZO1X-1, so an independent LZO1X
//! implementation must read ours and we must read its output:
//! - our streams decoded by `lzokay-native`, across block boundaries
//! - segmented compression decoded the same way
//! - `lzokay-native` streams decoded by `decompress_safe`

extern crate lzom;

use lzom::sg::{alloc_segments, linearize, split_segments};
use lzom::{
    compress_to_vec, compress_versioned, decompress_to_vec, worst_compress, BitstreamVersion,
    Dictionary,
};

/// Text, zero runs and noise interleaved.
fn sample(size: usize, seed: u32) -> Vec<u8> {
    let text = b"interoperable streams decode anywhere; ";
    let mut x = seed | 1;
    let mut out = Vec::with_capacity(size);
    while out.len() < size {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        let n = (x as usize % 400) + 1;
        match x >> 30 {
            0 => out.extend(std::iter::repeat(0u8).take(n)),
            1 => out.extend((0..n).map(|i| (x >> (i % 23)) as u8)),
            _ => out.extend(text.iter().cycle().skip(x as usize % text.len()).take(n)),
        }
    }
    out.truncate(size);
    out
}

fn external_decode(packed: &[u8], size: usize) -> Vec<u8> {
    lzokay_native::decompress_all(packed, Some(size))
        .expect("lzokay-native should decode the stream")
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: our streams, their decoder
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_external_decoder_reads_classic_streams() {
    let sizes = [1, 3, 4, 20, 21, 64, 1000, 4096, 0xbfff, 0xc000, 0xc001, 0xc015, 100_000, 200_000];
    for (i, &size) in sizes.iter().enumerate() {
        let data = sample(size, 0x51ed_270b ^ i as u32);
        let packed = compress_to_vec(&data, BitstreamVersion::V0).unwrap();
        assert_eq!(external_decode(&packed, size), data, "size {size}");
    }
}

#[test]
fn test_external_decoder_reads_zero_and_text_runs() {
    let zeros = vec![0u8; 70_000];
    let packed = compress_to_vec(&zeros, BitstreamVersion::V0).unwrap();
    assert_eq!(external_decode(&packed, zeros.len()), zeros);

    let text: Vec<u8> = b"abcabcabd".iter().cycle().take(50_000).copied().collect();
    let packed = compress_to_vec(&text, BitstreamVersion::V0).unwrap();
    assert_eq!(external_decode(&packed, text.len()), text);
}

#[test]
fn test_external_decoder_reads_segmented_output() {
    let data = sample(30_000, 77);
    let mut out = alloc_segments(worst_compress(data.len()), 512);
    let mut dict = Dictionary::new();
    let n = compress_versioned(split_segments(&data, 4096), &mut out, &mut dict, BitstreamVersion::V0)
        .unwrap();
    assert_eq!(external_decode(&linearize(&out, n), data.len()), data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: their streams, our decoder
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decoder_reads_external_streams() {
    for (i, size) in [1usize, 17, 300, 5000, 65_536, 150_000].into_iter().enumerate() {
        let data = sample(size, 0x9e37_79b9 ^ i as u32);
        let packed = lzokay_native::compress(&data).expect("lzokay-native should compress");
        assert_eq!(decompress_to_vec(&packed, size).unwrap(), data, "size {size}");
    }
}
