//! E2E Test Suite 03: Error Handling
//!
//! - a destination smaller than needed fails with OutputOverrun and nothing
//!   is written past its logical end
//! - error codes keep their conventional integer values
//! - the decoder rejects damaged streams without panicking

extern crate lzom;

use lzom::sg::{alloc_segments, ByteWindow};
use lzom::{
    compress, compress_to_vec, compress_window, decompress_safe, BitstreamVersion, Dictionary,
    LzoError,
};

fn text(size: usize) -> Vec<u8> {
    b"error handling keeps its promises; ".iter().cycle().take(size).copied().collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: small destinations
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_output_overrun_every_capacity() {
    let data = text(2000);
    let needed = compress_to_vec(&data, BitstreamVersion::V0).unwrap().len();
    for cap in 0..needed {
        let mut buf = vec![0x5au8; cap];
        let mut dict = Dictionary::new();
        let r = compress([&data[..]], [&mut buf[..]], &mut dict);
        assert_eq!(r, Err(LzoError::OutputOverrun), "capacity {cap}");
    }
    let mut buf = vec![0u8; needed];
    let mut dict = Dictionary::new();
    assert_eq!(compress([&data[..]], [&mut buf[..]], &mut dict), Ok(needed));
}

#[test]
fn test_no_write_past_logical_end() {
    let data = text(5000);
    let needed = compress_to_vec(&data, BitstreamVersion::V0).unwrap().len();
    let cap = needed / 2;
    let mut buf = vec![0xeeu8; needed + 64];
    {
        let mut src = ByteWindow::new([&data[..]]);
        let mut dst = ByteWindow::with_len([&mut buf[..]], cap).unwrap();
        let mut dict = Dictionary::new();
        assert_eq!(
            compress_window(&mut src, &mut dst, &mut dict, BitstreamVersion::V0),
            Err(LzoError::OutputOverrun)
        );
        assert!(dst.position() <= cap);
    }
    assert!(buf[cap..].iter().all(|&b| b == 0xee));
}

#[test]
fn test_segmented_destination_too_small() {
    let data = text(3000);
    let needed = compress_to_vec(&data, BitstreamVersion::V1).unwrap().len();
    let mut out = alloc_segments(needed - 1, 7);
    let mut dict = Dictionary::new();
    assert_eq!(
        lzom::compress_versioned([&data[..]], &mut out, &mut dict, BitstreamVersion::V1),
        Err(LzoError::OutputOverrun)
    );
}

#[test]
fn test_short_input_window() {
    let data = text(10);
    assert!(ByteWindow::with_len([&data[..]], 11).is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: error codes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_error_codes() {
    let expected = [
        (LzoError::Generic, -1),
        (LzoError::OutOfMemory, -2),
        (LzoError::NotCompressible, -3),
        (LzoError::InputOverrun, -4),
        (LzoError::OutputOverrun, -5),
        (LzoError::LookbehindOverrun, -6),
        (LzoError::EofNotFound, -7),
        (LzoError::InputNotConsumed, -8),
        (LzoError::NotYetImplemented, -9),
        (LzoError::InvalidArgument, -10),
    ];
    for (e, code) in expected {
        assert_eq!(e.code(), code);
        assert_eq!(LzoError::from_code(code), Some(e));
        assert!(!e.to_string().is_empty());
    }
}

#[test]
fn test_error_is_std_error() {
    fn takes(_: &dyn std::error::Error) {}
    takes(&LzoError::EofNotFound);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: damaged streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_every_truncation_fails() {
    let data = text(3000);
    for version in [BitstreamVersion::V0, BitstreamVersion::V1] {
        let packed = compress_to_vec(&data, version).unwrap();
        let mut out = vec![0u8; data.len()];
        // below 5 bytes a versioned header is not recognised at all
        for cut in 5..packed.len() {
            assert!(decompress_safe(&packed[..cut], &mut out).is_err(), "cut {cut}, {version:?}");
        }
    }
}

#[test]
fn test_bit_flips_never_panic() {
    let data = text(1500);
    let packed = compress_to_vec(&data, BitstreamVersion::V1).unwrap();
    let mut out = vec![0u8; 4 * data.len()];
    for i in 0..packed.len() {
        for bit in 0..8 {
            let mut bad = packed.clone();
            bad[i] ^= 1 << bit;
            let _ = decompress_safe(&bad, &mut out);
        }
    }
}

#[test]
fn test_unknown_version_header() {
    let mut packed = compress_to_vec(&text(100), BitstreamVersion::V1).unwrap();
    packed[1] = 7;
    let mut out = vec![0u8; 200];
    assert_eq!(decompress_safe(&packed, &mut out), Err(LzoError::NotYetImplemented));
}
