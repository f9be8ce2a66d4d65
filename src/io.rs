//! File-level compression on top of the segment-list codec.
//!
//! Files are loaded into fixed-size pages ([`load_segments`]) and handed to
//! the compressor as a segment list, the way a block device would hand over
//! an I/O vector.  Compressed output goes to pages sized for
//! [`worst_compress`] and only the bytes actually produced are written back.
//!
//! Decompression linearizes the compressed pages and decodes into a buffer
//! that grows while the decoder reports [`LzoError::OutputOverrun`].
//!
//! Codec failures surface as [`io::ErrorKind::InvalidData`] so the whole
//! layer speaks `io::Result`; the CLI adds path context with `anyhow`.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use crate::block::{compress_versioned, decompress_safe, worst_compress, BitstreamVersion, Dictionary};
use crate::config::DECOMPRESS_INITIAL_RATIO;
use crate::error::LzoError;
use crate::sg::{alloc_segments, linearize, Segments};

// Upper bound on the expansion ratio of any valid stream: one four-byte
// zero-run instruction yields 2051 bytes.
const MAX_EXPANSION: usize = 1024;

// ---------------------------------------------------------------------------
// Options and results
// ---------------------------------------------------------------------------

/// Per-file settings shared by [`compress_file`] and [`decompress_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOptions {
    /// Page size used when loading and allocating segment lists.
    pub segment_size: usize,
    /// Bitstream written by [`compress_file`].  Ignored when decompressing,
    /// the stream header decides.
    pub version: BitstreamVersion,
    /// Overwrite an existing destination.
    pub overwrite: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        FileOptions {
            segment_size: crate::config::SEGMENT_SIZE_DEFAULT,
            version: crate::config::BITSTREAM_DEFAULT,
            overwrite: false,
        }
    }
}

/// Byte counts of one file operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl FileStats {
    /// `bytes_out / bytes_in` as a percentage; 0 for empty input.
    pub fn ratio_percent(&self) -> f64 {
        if self.bytes_in == 0 {
            0.0
        } else {
            self.bytes_out as f64 * 100.0 / self.bytes_in as f64
        }
    }
}

fn codec_error(e: LzoError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

// ---------------------------------------------------------------------------
// Segment lists
// ---------------------------------------------------------------------------

/// Read `reader` to the end into pages of `segment_size` bytes.
///
/// Every page but the last is full; empty input yields no pages.
pub fn load_segments<R: Read>(mut reader: R, segment_size: usize) -> io::Result<Vec<Vec<u8>>> {
    if segment_size == 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "segment size must be non-zero"));
    }
    let mut segments = Vec::new();
    loop {
        let mut page = Vec::with_capacity(segment_size);
        let n = reader.by_ref().take(segment_size as u64).read_to_end(&mut page)?;
        if n == 0 {
            break;
        }
        segments.push(page);
        if n < segment_size {
            break;
        }
    }
    Ok(segments)
}

/// Write the first `len` bytes held by `segments` to `writer`.
pub fn write_segments<S: Segments + ?Sized, W: Write>(
    segments: &S,
    len: usize,
    writer: &mut W,
) -> io::Result<()> {
    let mut left = len;
    for i in 0..segments.segment_count() {
        if left == 0 {
            break;
        }
        let seg = segments.segment(i);
        let n = seg.len().min(left);
        writer.write_all(&seg[..n])?;
        left -= n;
    }
    if left > 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "segment list shorter than requested length"));
    }
    Ok(())
}

/// Compress a loaded segment list into freshly allocated output pages.
///
/// Returns the pages and the number of valid bytes in them.
pub fn compress_segments(
    input: &[Vec<u8>],
    segment_size: usize,
    version: BitstreamVersion,
    dict: &mut Dictionary,
) -> Result<(Vec<Vec<u8>>, usize), LzoError> {
    let total = input.total_len();
    let mut output = alloc_segments(worst_compress(total), segment_size);
    let n = compress_versioned(input, &mut output, dict, version)?;
    Ok((output, n))
}

/// Decode `src`, starting with `DECOMPRESS_INITIAL_RATIO * src.len()` bytes
/// of output and doubling on [`LzoError::OutputOverrun`].
pub fn decompress_growing(src: &[u8]) -> Result<Vec<u8>, LzoError> {
    let limit = src.len().saturating_mul(MAX_EXPANSION).max(64);
    let mut capacity = src.len().saturating_mul(DECOMPRESS_INITIAL_RATIO).clamp(64, limit);
    loop {
        let mut out = vec![0u8; capacity];
        match decompress_safe(src, &mut out) {
            Ok(n) => {
                out.truncate(n);
                return Ok(out);
            }
            Err(LzoError::OutputOverrun) if capacity < limit => {
                capacity = capacity.saturating_mul(2).min(limit);
            }
            Err(e) => return Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

fn open_dst(path: &Path, overwrite: bool) -> io::Result<BufWriter<File>> {
    let mut opts = OpenOptions::new();
    opts.write(true);
    if overwrite {
        opts.create(true).truncate(true);
    } else {
        opts.create_new(true);
    }
    Ok(BufWriter::new(opts.open(path)?))
}

/// Compress `src` into `dst`.
///
/// Fails with [`io::ErrorKind::AlreadyExists`] when `dst` exists and
/// `opts.overwrite` is false.
pub fn compress_file(src: &Path, dst: &Path, opts: &FileOptions) -> io::Result<FileStats> {
    let input = load_segments(File::open(src)?, opts.segment_size)?;
    let mut dict = Dictionary::new();
    let (output, n) =
        compress_segments(&input, opts.segment_size, opts.version, &mut dict).map_err(codec_error)?;

    let mut out = open_dst(dst, opts.overwrite)?;
    write_segments(&output, n, &mut out)?;
    out.flush()?;

    Ok(FileStats { bytes_in: input.total_len() as u64, bytes_out: n as u64 })
}

/// Decompress `src` into `dst`.
pub fn decompress_file(src: &Path, dst: &Path, opts: &FileOptions) -> io::Result<FileStats> {
    let input = load_segments(File::open(src)?, opts.segment_size)?;
    let total = input.total_len();
    let decoded = decompress_growing(&linearize(&input, total)).map_err(codec_error)?;

    let mut out = open_dst(dst, opts.overwrite)?;
    out.write_all(&decoded)?;
    out.flush()?;

    Ok(FileStats { bytes_in: total as u64, bytes_out: decoded.len() as u64 })
}
