// compress_file / decompress_file against real files

use std::fs;
use std::io::ErrorKind;

use lzom::block::BitstreamVersion;
use lzom::io::{compress_file, decompress_file, FileOptions};
use tempfile::TempDir;

fn sample(size: usize) -> Vec<u8> {
    let mut out = b"file layer sample, ".repeat(size / 19 + 1);
    out.truncate(size);
    for i in (0..out.len()).step_by(1000) {
        out[i..(i + 50).min(size)].fill(0);
    }
    out
}

fn opts(version: BitstreamVersion, segment_size: usize) -> FileOptions {
    FileOptions { segment_size, version, overwrite: false }
}

#[test]
fn round_trip_both_versions() {
    let dir = TempDir::new().unwrap();
    let data = sample(70_000);
    let src = dir.path().join("in.bin");
    fs::write(&src, &data).unwrap();

    for (i, version) in [BitstreamVersion::V0, BitstreamVersion::V1].into_iter().enumerate() {
        let packed = dir.path().join(format!("in.{i}.lzo"));
        let back = dir.path().join(format!("out.{i}.bin"));
        let o = opts(version, 4096);
        let c = compress_file(&src, &packed, &o).unwrap();
        assert_eq!(c.bytes_in, data.len() as u64);
        assert_eq!(c.bytes_out, fs::metadata(&packed).unwrap().len());
        let d = decompress_file(&packed, &back, &o).unwrap();
        assert_eq!(d.bytes_out, data.len() as u64);
        assert_eq!(fs::read(&back).unwrap(), data);
    }
}

#[test]
fn segment_size_does_not_change_output() {
    let dir = TempDir::new().unwrap();
    let data = sample(20_000);
    let src = dir.path().join("in.bin");
    fs::write(&src, &data).unwrap();

    let a = dir.path().join("a.lzo");
    let b = dir.path().join("b.lzo");
    compress_file(&src, &a, &opts(BitstreamVersion::V0, 4096)).unwrap();
    compress_file(&src, &b, &opts(BitstreamVersion::V0, 333)).unwrap();
    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn existing_output_needs_overwrite() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("in.bin");
    let dst = dir.path().join("in.bin.lzo");
    fs::write(&src, sample(100)).unwrap();
    fs::write(&dst, b"keep").unwrap();

    let err = compress_file(&src, &dst, &FileOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(fs::read(&dst).unwrap(), b"keep");

    let o = FileOptions { overwrite: true, ..FileOptions::default() };
    compress_file(&src, &dst, &o).unwrap();
    assert_ne!(fs::read(&dst).unwrap(), b"keep");
}

#[test]
fn empty_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("empty");
    let packed = dir.path().join("empty.lzo");
    let back = dir.path().join("empty.out");
    fs::write(&src, b"").unwrap();

    let c = compress_file(&src, &packed, &FileOptions::default()).unwrap();
    assert_eq!(c.bytes_out, 0);
    decompress_file(&packed, &back, &FileOptions::default()).unwrap();
    assert!(fs::read(&back).unwrap().is_empty());
}

#[test]
fn corrupt_input_is_invalid_data() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("bad.lzo");
    fs::write(&src, [0x40u8, 0x00, 0x00, 0x11]).unwrap();
    let err = decompress_file(&src, &dir.path().join("bad"), &FileOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert!(!dir.path().join("bad").exists());
}

#[test]
fn missing_input_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = compress_file(&dir.path().join("nope"), &dir.path().join("nope.lzo"), &FileOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
