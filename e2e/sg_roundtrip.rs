//! E2E Test Suite 01: Scatter-Gather Round Trips
//!
//! The compressed stream must not depend on how the input or the output is
//! split into segments:
//! - uniform segment sizes from 1 byte up to a page
//! - irregular sizes with empty segments interleaved
//! - segmented output, including 1-byte output pages
//! - both bitstream versions, single- and multi-block inputs

extern crate lzom;

use lzom::sg::{alloc_segments, linearize, split_segments};
use lzom::{
    compress_to_vec, compress_versioned, decompress_to_vec, worst_compress, BitstreamVersion,
    Dictionary,
};

const VERSIONS: [BitstreamVersion; 2] = [BitstreamVersion::V0, BitstreamVersion::V1];

/// Text, zero runs and noise interleaved.
fn mixed_data(size: usize, seed: u32) -> Vec<u8> {
    let text = b"scatter gather lists carry pages of a block request; ";
    let mut x = seed | 1;
    let mut out = Vec::with_capacity(size);
    while out.len() < size {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        let n = (x as usize % 300) + 1;
        match x >> 30 {
            0 => out.extend(std::iter::repeat(0u8).take(n)),
            1 => out.extend((0..n).map(|i| (x >> (i % 24)) as u8)),
            _ => out.extend(text.iter().cycle().skip(x as usize % text.len()).take(n)),
        }
    }
    out.truncate(size);
    out
}

fn compress_split(
    data: &[u8],
    segments: Vec<&[u8]>,
    out_page: usize,
    version: BitstreamVersion,
) -> Vec<u8> {
    let mut out = alloc_segments(worst_compress(data.len()), out_page);
    let mut dict = Dictionary::new();
    let n = compress_versioned(segments, &mut out, &mut dict, version).expect("compression should succeed");
    linearize(&out, n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: uniform input segmentation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_uniform_input_segments_match_contiguous() {
    let data = mixed_data(6000, 7);
    for version in VERSIONS {
        let expected = compress_to_vec(&data, version).unwrap();
        for size in [2, 3, 7, 64, 511, 4096] {
            let got = compress_split(&data, split_segments(&data, size), 4096, version);
            assert_eq!(got, expected, "segment size {size}, {version:?}");
        }
        assert_eq!(decompress_to_vec(&expected, data.len()).unwrap(), data);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: one-byte input segments
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_single_byte_segments() {
    let data = mixed_data(1500, 11);
    for version in VERSIONS {
        let expected = compress_to_vec(&data, version).unwrap();
        let got = compress_split(&data, split_segments(&data, 1), 4096, version);
        assert_eq!(got, expected, "{version:?}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: irregular segments with empty ones in between
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_irregular_segments_with_empties() {
    let data = mixed_data(8000, 23);
    let mut segments: Vec<&[u8]> = vec![&data[..0]];
    let mut at = 0;
    let mut k = 1;
    while at < data.len() {
        let n = (k * 37 % 101).min(data.len() - at);
        segments.push(&data[at..at + n]);
        segments.push(&data[at..at]);
        at += n;
        k += 1;
    }
    for version in VERSIONS {
        let expected = compress_to_vec(&data, version).unwrap();
        let got = compress_split(&data, segments.clone(), 4096, version);
        assert_eq!(got, expected, "{version:?}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: segmented output
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_output_segmentation_is_invisible() {
    let data = mixed_data(3000, 5);
    for version in VERSIONS {
        let expected = compress_to_vec(&data, version).unwrap();
        for page in [1, 2, 3, 5, 100] {
            let got = compress_split(&data, split_segments(&data, 4096), page, version);
            assert_eq!(got, expected, "output page {page}, {version:?}");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: multi-block inputs in pages
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_multi_block_paged_round_trip() {
    let data = mixed_data(200_000, 99);
    for version in VERSIONS {
        let expected = compress_to_vec(&data, version).unwrap();
        let got = compress_split(&data, split_segments(&data, 4096), 4096, version);
        assert_eq!(got, expected, "{version:?}");
        assert!(got.len() <= worst_compress(data.len()));
        assert_eq!(decompress_to_vec(&got, data.len()).unwrap(), data);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: round trips over many sizes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_round_trip_sizes() {
    for size in [0, 1, 3, 4, 19, 20, 21, 22, 40, 63, 64, 65, 255, 256, 1000, 0xbfff, 0xc000, 0xc001, 0xc014, 0xc015, 0xc016] {
        let data = mixed_data(size, size as u32 + 3);
        for version in VERSIONS {
            let packed = compress_to_vec(&data, version).unwrap();
            assert!(packed.len() <= worst_compress(size), "size {size}");
            assert_eq!(decompress_to_vec(&packed, size).unwrap(), data, "size {size}, {version:?}");
        }
    }
}
