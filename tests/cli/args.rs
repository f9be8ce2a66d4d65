// Command-line parsing and job resolution

use std::path::PathBuf;

use clap::Parser;
use lzom::block::BitstreamVersion;
use lzom::cli::args::Args;
use lzom::cli::op_mode::OpMode;
use lzom::config::{DISPLAY_LEVEL_DEFAULT, SEGMENT_SIZE_DEFAULT};

fn parse(argv: &[&str]) -> Args {
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn default_segment_size_and_version() {
    let a = parse(&["lzom", "x"]);
    assert_eq!(a.segment_size, SEGMENT_SIZE_DEFAULT);
    assert_eq!(a.file_options().version, BitstreamVersion::V0);
    assert_eq!(a.display_level(), DISPLAY_LEVEL_DEFAULT);
}

#[test]
fn long_flags() {
    let a = parse(&["lzom", "--decompress", "--force", "--quiet", "--segment-size", "1M", "x.lzo"]);
    assert_eq!(a.op_mode(), OpMode::Decompress);
    assert!(a.force);
    assert_eq!(a.display_level(), DISPLAY_LEVEL_DEFAULT - 1);
    assert_eq!(a.segment_size, 1 << 20);
}

#[test]
fn explicit_output() {
    let jobs = parse(&["lzom", "-o", "packed", "data"]).jobs().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].output, PathBuf::from("packed"));
    assert_eq!(jobs[0].mode, OpMode::Compress);
}

#[test]
fn force_compress_of_lzo_name() {
    let jobs = parse(&["lzom", "-z", "a.lzo"]).jobs().unwrap();
    assert_eq!(jobs[0].mode, OpMode::Compress);
    assert_eq!(jobs[0].output, PathBuf::from("a.lzo.lzo"));
}

#[test]
fn decompress_needs_suffix() {
    assert!(parse(&["lzom", "-d", "plain"]).jobs().is_err());
}

#[test]
fn same_input_and_output_rejected() {
    assert!(parse(&["lzom", "-o", "f", "f"]).jobs().is_err());
}

#[test]
fn oversized_segment_rejected() {
    assert!(Args::try_parse_from(["lzom", "--segment-size", "1G", "x"]).is_err());
    assert!(Args::try_parse_from(["lzom", "--segment-size", "abc", "x"]).is_err());
}
