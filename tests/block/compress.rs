// Block compressor and stream driver
//
// Covers:
//   - exact byte layout for the short-input and opening-literal forms
//   - the matcher on a run of identical bytes
//   - block splitting for inputs longer than the M4 window
//   - compress_window on caller-positioned windows
//   - dictionary reuse across calls

use lzom::block::{
    compress, compress_to_vec, compress_versioned, compress_window, decompress_to_vec,
    worst_compress, BitstreamVersion, Dictionary,
};
use lzom::sg::{split_segments, ByteWindow};
use lzom::LzoError;

// 300 bytes whose 4-byte substrings are all distinct.
fn unique_quads() -> Vec<u8> {
    (0u16..150).flat_map(|i| i.to_be_bytes()).collect()
}

fn lorem(size: usize) -> Vec<u8> {
    b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor. "
        .iter()
        .cycle()
        .take(size)
        .copied()
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Byte layout
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_input_writes_nothing() {
    assert!(compress_to_vec(b"", BitstreamVersion::V0).unwrap().is_empty());
    assert!(compress_to_vec(b"", BitstreamVersion::V1).unwrap().is_empty());
}

#[test]
fn three_bytes_use_opening_literal() {
    let out = compress_to_vec(b"abc", BitstreamVersion::V0).unwrap();
    assert_eq!(out, vec![20, b'a', b'b', b'c', 17, 0, 0]);
}

#[test]
fn versioned_short_input_gets_header() {
    let out = compress_to_vec(b"abc", BitstreamVersion::V1).unwrap();
    assert_eq!(out, vec![17, 1, 20, b'a', b'b', b'c', 17, 0, 0]);
}

#[test]
fn block_without_matches_is_one_opening_literal() {
    // 21 bytes: too short to scan, flushed as the opening literal
    let data = &unique_quads()[..21];
    let out = compress_to_vec(data, BitstreamVersion::V0).unwrap();
    assert_eq!(out[0], 17 + 21);
    assert_eq!(&out[1..22], data);
    assert_eq!(&out[22..], &[17, 0, 0]);
}

#[test]
fn long_opening_literal_uses_length_tail() {
    // 300 > 238: zero opcode, then 300 - 18 = 282 = 255 + 27
    let data = unique_quads();
    let out = compress_to_vec(&data, BitstreamVersion::V0).unwrap();
    assert_eq!(&out[..3], &[0, 0, 27]);
    assert_eq!(&out[3..303], &data[..]);
    assert_eq!(&out[303..], &[17, 0, 0]);
}

#[test]
fn zero_bytes_classic_layout() {
    // 5 literals, one M3 match of 44 at distance 5, 15 trailing literals
    let out = compress_to_vec(&[0u8; 64], BitstreamVersion::V0).unwrap();
    let mut expected = vec![2, 0, 0, 0, 0, 0, 32, 11, 16, 0, 12];
    expected.extend_from_slice(&[0u8; 15]);
    expected.extend_from_slice(&[17, 0, 0]);
    assert_eq!(out, expected);
}

#[test]
fn zero_bytes_versioned_layout() {
    // header, 5 literals, zero run of 39, 20 trailing literals
    let out = compress_to_vec(&[0u8; 64], BitstreamVersion::V1).unwrap();
    let mut expected = vec![17, 1, 2, 0, 0, 0, 0, 0, 0x1b, 0xfc, 0xff, 0x04, 0, 2];
    expected.extend_from_slice(&[0u8; 20]);
    expected.extend_from_slice(&[17, 0, 0]);
    assert_eq!(out, expected);
}

// Input holding a copy of `len` bytes at distance 0x403f + 0x4000, whose M4
// offset bytes come out as `fc 00`.
fn m4_corner_input(len: usize) -> Vec<u8> {
    let mut x = 0x2545_f491u32;
    let mut block = Vec::with_capacity(len);
    while block.len() < len {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        let b = (x >> 11) as u8;
        if b != 0 {
            block.push(b);
        }
    }
    let mut data = b"abcdefghabcdefgh".to_vec();
    data.extend_from_slice(&block);
    data.resize(16 + 0x803f, 0);
    data.extend_from_slice(&block);
    data.extend(200u8..232);
    data
}

fn m4_corner_instruction(len: usize) -> Vec<u8> {
    let mut op = vec![0x18];
    let mut x = len - 9;
    while x > 255 {
        op.push(0);
        x -= 255;
    }
    op.extend_from_slice(&[x as u8, 0xfc, 0x00]);
    op
}

fn contains(hay: &[u8], needle: &[u8]) -> bool {
    hay.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn versioned_m4_corner_lengths_are_cut_to_260() {
    for len in 259..=266 {
        let data = m4_corner_input(len);
        let classic = compress_to_vec(&data, BitstreamVersion::V0).unwrap();
        let versioned = compress_to_vec(&data, BitstreamVersion::V1).unwrap();

        assert!(contains(&classic, &m4_corner_instruction(len)), "v0, length {len}");
        let cut = if (261..=264).contains(&len) { 260 } else { len };
        assert!(contains(&versioned, &m4_corner_instruction(cut)), "v1, length {len}");
        if cut != len {
            assert!(!contains(&versioned, &m4_corner_instruction(len)), "v1, length {len}");
        }

        assert_eq!(decompress_to_vec(&classic, data.len()).unwrap(), data, "v0, length {len}");
        assert_eq!(decompress_to_vec(&versioned, data.len()).unwrap(), data, "v1, length {len}");
    }
}

#[test]
fn versioned_m4_corner_exact_bytes() {
    let data = m4_corner_input(264);
    let versioned = compress_to_vec(&data, BitstreamVersion::V1).unwrap();
    assert!(contains(&versioned, &[0x18, 251, 0xfc, 0x00]));
    let classic = compress_to_vec(&data, BitstreamVersion::V0).unwrap();
    assert!(contains(&classic, &[0x18, 255, 0xfc, 0x00]));
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips through the driver
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn repetitive_text_shrinks() {
    let data = lorem(10_000);
    let out = compress_to_vec(&data, BitstreamVersion::V0).unwrap();
    assert!(out.len() < data.len() / 4, "compressed {} bytes", out.len());
    assert_eq!(decompress_to_vec(&out, data.len()).unwrap(), data);
}

#[test]
fn input_spanning_several_blocks() {
    // Three full blocks plus a tail, both bitstreams
    let data = lorem(3 * 0xc000 + 1000);
    for version in [BitstreamVersion::V0, BitstreamVersion::V1] {
        let out = compress_to_vec(&data, version).unwrap();
        assert!(out.len() <= worst_compress(data.len()));
        assert_eq!(decompress_to_vec(&out, data.len()).unwrap(), data, "{version:?}");
    }
}

#[test]
fn tail_shorter_than_margin_is_flushed() {
    // second block would be 10 bytes: carried as literals
    let mut data = lorem(0xc000);
    data.extend_from_slice(b"0123456789");
    let out = compress_to_vec(&data, BitstreamVersion::V0).unwrap();
    assert_eq!(&out[out.len() - 3..], &[17, 0, 0]);
    assert_eq!(decompress_to_vec(&out, data.len()).unwrap(), data);
}

#[test]
fn segment_list_api_matches_contiguous() {
    let data = lorem(5000);
    let expected = compress_to_vec(&data, BitstreamVersion::V0).unwrap();

    let mut out = vec![vec![0u8; 100]; worst_compress(data.len()) / 100 + 1];
    let mut dict = Dictionary::new();
    let n = compress(split_segments(&data, 333), &mut out, &mut dict).unwrap();
    assert_eq!(n, expected.len());
    assert_eq!(&out.concat()[..n], &expected[..]);
}

#[test]
fn dictionary_reuse_is_deterministic() {
    let mut dict = Dictionary::new();
    let a = lorem(4000);
    let b = unique_quads();
    let mut first = vec![0u8; worst_compress(a.len())];
    let n1 = compress_versioned([&a[..]], [&mut first[..]], &mut dict, BitstreamVersion::V0).unwrap();
    // stale slots from `a` must not leak into the next stream
    let mut second = vec![0u8; worst_compress(b.len())];
    let n2 = compress_versioned([&b[..]], [&mut second[..]], &mut dict, BitstreamVersion::V0).unwrap();
    assert_eq!(&first[..n1], &compress_to_vec(&a, BitstreamVersion::V0).unwrap()[..]);
    assert_eq!(&second[..n2], &compress_to_vec(&b, BitstreamVersion::V0).unwrap()[..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// compress_window
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn window_compresses_from_current_position() {
    let data = lorem(2000);
    let mut src = ByteWindow::new([&data[..]]);
    src.skip_forward(500).unwrap();
    let mut buf = vec![0u8; worst_compress(1500)];
    let mut dst = ByteWindow::new([&mut buf[..]]);
    let mut dict = Dictionary::new();

    let n = compress_window(&mut src, &mut dst, &mut dict, BitstreamVersion::V0).unwrap();
    assert_eq!(src.remaining(), 0);
    assert_eq!(dst.position(), n);
    assert_eq!(&buf[..n], &compress_to_vec(&data[500..], BitstreamVersion::V0).unwrap()[..]);
}

#[test]
fn window_appends_after_existing_output() {
    let data = lorem(1000);
    let mut src = ByteWindow::new([&data[..]]);
    let mut buf = vec![0xeeu8; 8 + worst_compress(1000)];
    let mut dst = ByteWindow::new([&mut buf[..]]);
    dst.skip_forward(8).unwrap();
    let mut dict = Dictionary::new();

    let n = compress_window(&mut src, &mut dst, &mut dict, BitstreamVersion::V0).unwrap();
    assert_eq!(dst.position(), 8 + n);
    assert_eq!(&buf[..8], &[0xee; 8]);
    assert_eq!(decompress_to_vec(&buf[8..8 + n], 1000).unwrap(), data);
}

#[test]
fn window_reports_output_overrun() {
    let data = lorem(1000);
    let mut src = ByteWindow::new([&data[..]]);
    let mut buf = vec![0u8; 16];
    let mut dst = ByteWindow::new([&mut buf[..]]);
    let mut dict = Dictionary::new();
    assert_eq!(
        compress_window(&mut src, &mut dst, &mut dict, BitstreamVersion::V0),
        Err(LzoError::OutputOverrun)
    );
}
