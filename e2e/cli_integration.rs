// e2e/cli_integration.rs — CLI integration tests
//
// Runs the `lzom` binary as a black box with std::process::Command: default
// output names, explicit output, overwrite protection, the versioned
// bitstream, several inputs at once, and exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Locate the `lzom` binary produced by Cargo.
fn lzom_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_lzom") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("lzom");
    p
}

fn lzom(dir: &Path, args: &[&str]) -> Output {
    Command::new(lzom_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run lzom")
}

/// TempDir holding `input.txt` with ~8 KB of text and a zero-filled hole.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    let mut content = "Hello, LZO!\n".repeat(400).into_bytes();
    content.extend(std::iter::repeat(0u8).take(3000));
    content.extend_from_slice(b"tail\n");
    fs::write(&input, content).unwrap();
    (dir, input)
}

// ── 1. Default names round trip ──────────────────────────────────────────────

#[test]
fn test_cli_default_names_round_trip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = lzom(dir.path(), &["input.txt"]);
    assert!(out.status.success(), "compress should exit 0: {}", String::from_utf8_lossy(&out.stderr));
    let packed = dir.path().join("input.txt.lzo");
    assert!(packed.exists());
    assert!(fs::metadata(&packed).unwrap().len() < original.len() as u64);

    fs::remove_file(&input).unwrap();
    let out = lzom(dir.path(), &["input.txt.lzo"]);
    assert!(out.status.success(), "decompress should exit 0: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&input).unwrap(), original);
}

// ── 2. Explicit output and -d ────────────────────────────────────────────────

#[test]
fn test_cli_explicit_output() {
    let (dir, _input) = make_temp_input();
    let out = lzom(dir.path(), &["-q", "-o", "packed.bin", "input.txt"]);
    assert!(out.status.success());
    assert!(out.stderr.is_empty(), "-q should silence the summary");

    let out = lzom(dir.path(), &["-d", "-o", "back.txt", "packed.bin"]);
    assert!(out.status.success());
    assert_eq!(
        fs::read(dir.path().join("back.txt")).unwrap(),
        fs::read(dir.path().join("input.txt")).unwrap()
    );
}

// ── 3. Overwrite protection ──────────────────────────────────────────────────

#[test]
fn test_cli_refuses_overwrite_without_force() {
    let (dir, _input) = make_temp_input();
    fs::write(dir.path().join("input.txt.lzo"), b"precious").unwrap();

    let out = lzom(dir.path(), &["input.txt"]);
    assert!(!out.status.success());
    assert_eq!(fs::read(dir.path().join("input.txt.lzo")).unwrap(), b"precious");

    let out = lzom(dir.path(), &["-f", "input.txt"]);
    assert!(out.status.success());
    assert_ne!(fs::read(dir.path().join("input.txt.lzo")).unwrap(), b"precious");
}

// ── 4. --rle ─────────────────────────────────────────────────────────────────

#[test]
fn test_cli_rle_stream() {
    let (dir, input) = make_temp_input();
    let out = lzom(dir.path(), &["--rle", "--segment-size", "512", "-o", "rle.lzo", "input.txt"]);
    assert!(out.status.success());
    let packed = fs::read(dir.path().join("rle.lzo")).unwrap();
    assert_eq!(&packed[..2], &[17, 1]);

    let out = lzom(dir.path(), &["-o", "rle.out", "rle.lzo"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("rle.out")).unwrap(), fs::read(&input).unwrap());
}

// ── 5. Several inputs ────────────────────────────────────────────────────────

#[test]
fn test_cli_multiple_inputs() {
    let dir = TempDir::new().unwrap();
    let names: Vec<String> = (0..6).map(|i| format!("f{i}.dat")).collect();
    for (i, n) in names.iter().enumerate() {
        fs::write(dir.path().join(n), format!("file number {i} ").repeat(200 * (i + 1))).unwrap();
    }
    let args: Vec<&str> = names.iter().map(String::as_str).collect();
    let out = lzom(dir.path(), &args);
    assert!(out.status.success());
    for n in &names {
        assert!(dir.path().join(format!("{n}.lzo")).exists(), "{n}.lzo missing");
    }
}

#[test]
fn test_cli_partial_failure_exit_code() {
    let (dir, _input) = make_temp_input();
    let out = lzom(dir.path(), &["input.txt", "missing.txt"]);
    assert!(!out.status.success());
    assert!(dir.path().join("input.txt.lzo").exists());
    assert!(String::from_utf8_lossy(&out.stderr).contains("missing.txt"));
}

// ── 6. Bad usage ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_bad_usage() {
    let (dir, _input) = make_temp_input();
    assert!(!lzom(dir.path(), &[]).status.success());
    assert!(!lzom(dir.path(), &["-d", "input.txt"]).status.success());
    assert!(!lzom(dir.path(), &["-o", "x", "input.txt", "input.txt"]).status.success());
    assert!(!lzom(dir.path(), &["--segment-size", "0", "input.txt"]).status.success());
}

#[test]
fn test_cli_corrupt_input() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.lzo"), [0x40u8, 0, 0, 0, 0]).unwrap();
    let out = lzom(dir.path(), &["bad.lzo"]);
    assert!(!out.status.success());
    assert!(!dir.path().join("bad").exists());
}

// ── 7. --version / --help ────────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let out = lzom(Path::new("."), &["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(lzom::LZOM_VERSION_STRING));
}

#[test]
fn test_cli_help() {
    let out = lzom(Path::new("."), &["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).to_lowercase().contains("usage"));
}
