// Mode inference and default output names

use std::path::{Path, PathBuf};

use lzom::cli::op_mode::{determine_op_mode, output_filename, resolve, OpMode};

#[test]
fn auto_mode_follows_extension() {
    assert_eq!(determine_op_mode(Path::new("x.lzo")), OpMode::Decompress);
    assert_eq!(determine_op_mode(Path::new("x.lzop")), OpMode::Compress);
    assert_eq!(resolve(OpMode::Auto, Path::new("x")), OpMode::Compress);
    assert_eq!(resolve(OpMode::Decompress, Path::new("x")), OpMode::Decompress);
}

#[test]
fn compress_appends_extension() {
    assert_eq!(
        output_filename(Path::new("dir/file.tar"), OpMode::Auto).unwrap(),
        PathBuf::from("dir/file.tar.lzo")
    );
}

#[test]
fn decompress_strips_extension() {
    assert_eq!(
        output_filename(Path::new("dir/file.tar.lzo"), OpMode::Decompress).unwrap(),
        PathBuf::from("dir/file.tar")
    );
    assert!(output_filename(Path::new("dir/.lzo"), OpMode::Decompress).is_err());
}
