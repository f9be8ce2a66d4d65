//! Operation mode selection and output-name resolution.
//!
//! - [`OpMode`]: compress or decompress, possibly inferred from the name.
//! - [`determine_op_mode`]: `.lzo` files decompress, everything else compresses.
//! - [`output_filename`]: `FILE` → `FILE.lzo` and back.

use std::path::{Path, PathBuf};

use anyhow::bail;

use crate::cli::constants::LZO_EXTENSION;

/// What the CLI should do with an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Decide per file from its extension.
    Auto,
    Compress,
    Decompress,
}

/// Infer the operation from `path`'s extension.
pub fn determine_op_mode(path: &Path) -> OpMode {
    if has_lzo_extension(path) {
        OpMode::Decompress
    } else {
        OpMode::Compress
    }
}

fn has_lzo_extension(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().ends_with(LZO_EXTENSION)
}

/// Resolve [`OpMode::Auto`] for `path`; explicit modes are returned as is.
pub fn resolve(mode: OpMode, path: &Path) -> OpMode {
    match mode {
        OpMode::Auto => determine_op_mode(path),
        m => m,
    }
}

/// Default destination for `input`.
///
/// Compression appends `.lzo`; decompression strips it and refuses names
/// without it.
pub fn output_filename(input: &Path, mode: OpMode) -> anyhow::Result<PathBuf> {
    let name = input.as_os_str().to_string_lossy();
    match resolve(mode, input) {
        OpMode::Decompress => match name.strip_suffix(LZO_EXTENSION) {
            Some(stem) if !stem.is_empty() && !stem.ends_with(std::path::MAIN_SEPARATOR) => {
                Ok(PathBuf::from(stem))
            }
            _ => bail!("{}: unknown suffix, expected {}", name, LZO_EXTENSION),
        },
        _ => {
            let mut out = input.as_os_str().to_owned();
            out.push(LZO_EXTENSION);
            Ok(PathBuf::from(out))
        }
    }
}
