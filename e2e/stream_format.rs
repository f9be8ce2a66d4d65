//! E2E Test Suite 02: Stream Format
//!
//! Checks the bytes on the wire rather than just round trips:
//! - empty input, short literal-only inputs, the end-of-stream marker
//! - streams longer than one block stay one continuous stream
//! - the versioned header and zero-run instructions
//! - the worst-case bound

extern crate lzom;

use lzom::block::types::{EOF_MARKER, MAX_ZERO_RUN_LENGTH};
use lzom::{compress_to_vec, decompress_safe, decompress_to_vec, worst_compress, BitstreamVersion};

fn text(size: usize) -> Vec<u8> {
    b"The quick brown fox jumps over the lazy dog. "
        .iter()
        .cycle()
        .take(size)
        .copied()
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: empty and tiny inputs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_input_produces_no_bytes() {
    assert_eq!(compress_to_vec(b"", BitstreamVersion::V0).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_abc_exact_bytes() {
    assert_eq!(
        compress_to_vec(b"abc", BitstreamVersion::V0).unwrap(),
        vec![20, b'a', b'b', b'c', 17, 0, 0]
    );
}

#[test]
fn test_literal_only_up_to_margin() {
    for n in 1..=20usize {
        let data: Vec<u8> = (0..n as u8).collect();
        let out = compress_to_vec(&data, BitstreamVersion::V0).unwrap();
        assert_eq!(out.len(), 1 + n + 3);
        assert_eq!(out[0] as usize, 17 + n);
        assert_eq!(&out[1..=n], &data[..]);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: zero bytes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_64_zero_bytes() {
    let zeros = [0u8; 64];
    for version in [BitstreamVersion::V0, BitstreamVersion::V1] {
        let out = compress_to_vec(&zeros, version).unwrap();
        assert!(out.len() < 64, "{version:?}: {} bytes", out.len());
        assert_eq!(&out[out.len() - 3..], &EOF_MARKER);
        assert_eq!(decompress_to_vec(&out, 64).unwrap(), zeros);
    }
}

#[test]
fn test_long_zero_run_uses_rle() {
    let zeros = vec![0u8; 40_000];
    let classic = compress_to_vec(&zeros, BitstreamVersion::V0).unwrap();
    let versioned = compress_to_vec(&zeros, BitstreamVersion::V1).unwrap();
    assert_eq!(&versioned[..2], &[17, 1]);
    // roughly four bytes per maximal run
    assert!(versioned.len() < 4 * (40_000 / MAX_ZERO_RUN_LENGTH + 1) + 64, "{} bytes", versioned.len());
    assert!(versioned.len() < classic.len());
    assert_eq!(decompress_to_vec(&versioned, zeros.len()).unwrap(), zeros);
    assert_eq!(decompress_to_vec(&classic, zeros.len()).unwrap(), zeros);
}

#[test]
fn test_zero_runs_between_text() {
    let mut data = text(500);
    data.extend(std::iter::repeat(0u8).take(3000));
    data.extend(text(500));
    data.extend(std::iter::repeat(0u8).take(5));
    data.extend(text(100));
    let out = compress_to_vec(&data, BitstreamVersion::V1).unwrap();
    assert_eq!(decompress_to_vec(&out, data.len()).unwrap(), data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: versioned header
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_versioned_stream_header() {
    let out = compress_to_vec(&text(1000), BitstreamVersion::V1).unwrap();
    assert_eq!(&out[..2], &[17, 1]);
    let classic = compress_to_vec(&text(1000), BitstreamVersion::V0).unwrap();
    assert_ne!(classic[0], 17);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: multi-block streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_multi_block_is_one_stream() {
    let data = text(0xc000 * 2 + 777);
    let out = compress_to_vec(&data, BitstreamVersion::V0).unwrap();
    assert!(out.len() < data.len() / 8);
    assert_eq!(&out[out.len() - 3..], &EOF_MARKER);
    let mut back = vec![0u8; data.len()];
    assert_eq!(decompress_safe(&out, &mut back), Ok(data.len()));
    assert_eq!(back, data);
}

#[test]
fn test_block_boundary_sizes() {
    for extra in [0usize, 1, 19, 20, 21, 64] {
        for version in [BitstreamVersion::V0, BitstreamVersion::V1] {
            let size = version.m4_max_offset() + 1 + extra;
            let data = text(size);
            let out = compress_to_vec(&data, version).unwrap();
            assert_eq!(decompress_to_vec(&out, size).unwrap(), data, "size {size}, {version:?}");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: worst case
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_incompressible_within_bound() {
    let mut x = 0x9e37_79b9u32;
    let data: Vec<u8> = (0..100_000)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x >> 7) as u8
        })
        .collect();
    for version in [BitstreamVersion::V0, BitstreamVersion::V1] {
        let out = compress_to_vec(&data, version).unwrap();
        assert!(out.len() <= worst_compress(data.len()));
        assert_eq!(decompress_to_vec(&out, data.len()).unwrap(), data);
    }
}
