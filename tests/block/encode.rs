// Instruction writers on segmented output
//
// Backpatching has to reach across segment boundaries, including empty
// segments, and every writer must fail before touching a too-small window.

use lzom::block::encode::{
    emit_eof, emit_header, emit_literals, emit_match, emit_zero_run, match_len, MATCH_BACKPATCH,
    ZERO_RUN_BACKPATCH,
};
use lzom::block::BitstreamVersion;
use lzom::sg::{linearize, ByteWindow};
use lzom::LzoError;

#[test]
fn backpatch_across_segments() {
    let data = *b"ab";
    let input = ByteWindow::new([&data[..]]);
    // 1-byte pages with empty pages between them
    let mut pages: Vec<Vec<u8>> = (0..12).map(|i| vec![0u8; i % 2]).collect();
    let mut out = ByteWindow::new(&mut pages);
    emit_match(&mut out, 1, 4).unwrap();
    let mut slot = Some(MATCH_BACKPATCH);
    emit_literals(&input, input.snapshot(), 2, &mut out, &mut slot, false).unwrap();
    assert_eq!(slot, None);
    assert_eq!(out.position(), 4);
    assert_eq!(linearize(&pages, 4), vec![0x62, 0x00, b'a', b'b']);
}

#[test]
fn zero_run_backpatch_offset() {
    let data = *b"z";
    let input = ByteWindow::new([&data[..]]);
    let mut buf = [0u8; 8];
    let mut out = ByteWindow::new([&mut buf[..]]);
    emit_zero_run(&mut out, 4).unwrap();
    let mut slot = Some(ZERO_RUN_BACKPATCH);
    emit_literals(&input, input.snapshot(), 1, &mut out, &mut slot, false).unwrap();
    // the count lands in the low bits of the 0xfc byte
    assert_eq!(&buf[..5], &[0x18, 0xfd, 0xff, 0x00, b'z']);
}

#[test]
fn short_literal_without_slot_uses_opening_form() {
    let data = *b"xy";
    let input = ByteWindow::new([&data[..]]);
    let mut buf = [0u8; 3];
    let mut out = ByteWindow::new([&mut buf[..]]);
    let mut slot = None;
    emit_literals(&input, input.snapshot(), 2, &mut out, &mut slot, false).unwrap();
    assert_eq!(buf, [19, b'x', b'y']);
}

#[test]
fn header_only_for_versioned_stream() {
    let mut buf = [0u8; 2];
    let mut out = ByteWindow::new([&mut buf[..]]);
    emit_header(&mut out, BitstreamVersion::V0).unwrap();
    assert_eq!(out.position(), 0);
    emit_header(&mut out, BitstreamVersion::V1).unwrap();
    assert_eq!(buf, [17, 1]);
}

#[test]
fn writers_fail_cleanly() {
    let mut buf = [0xaau8; 2];
    let mut out = ByteWindow::new([&mut buf[..]]);
    assert_eq!(emit_eof(&mut out), Err(LzoError::OutputOverrun));
    assert_eq!(emit_zero_run(&mut out, 10), Err(LzoError::OutputOverrun));
    assert_eq!(emit_match(&mut out, 0x5000, 3), Err(LzoError::OutputOverrun));
    assert_eq!(out.position(), 0);
    assert_eq!(buf, [0xaa, 0xaa]);
}

#[test]
fn match_sizes() {
    assert_eq!(match_len(0x800, 8), 2);
    assert_eq!(match_len(0x800, 9), 3);
    assert_eq!(match_len(0x4000, 33), 3);
    assert_eq!(match_len(0x4000, 34), 4);
    assert_eq!(match_len(0x4001, 9), 3);
    assert_eq!(match_len(0x4001, 9 + 255 + 1), 5);
}
