// config.rs — Compile-time defaults for the file layer and the CLI.
//
// The codec itself takes no global configuration: the bitstream version is a
// per-call argument and the dictionary is caller-owned scratch.

use crate::block::BitstreamVersion;

// Size of each segment when a file is loaded as a segment list.  One page,
// the usual granularity of block I/O vectors.
// Overridden by the --segment-size command-line flag.
pub const SEGMENT_SIZE_DEFAULT: usize = 4096;

// Largest accepted segment size (16 MiB).
pub const SEGMENT_SIZE_MAX: usize = 16 << 20;

// Bitstream produced by the CLI unless --rle is given.
pub const BITSTREAM_DEFAULT: BitstreamVersion = BitstreamVersion::V0;

// Extension appended to compressed files.
pub const LZO_EXTENSION: &str = ".lzo";

// 0 = silent; 1 = errors only; 2 = normal; 3 = verbose; 4 = debug.
pub const DISPLAY_LEVEL_DEFAULT: u32 = 2;

// Decompression starts with `ratio * compressed_len` bytes of output and
// doubles on overrun.
pub const DECOMPRESS_INITIAL_RATIO: usize = 4;

/// Validate a segment size: zero and anything above [`SEGMENT_SIZE_MAX`]
/// are rejected.
pub fn check_segment_size(n: usize) -> Option<usize> {
    (n > 0 && n <= SEGMENT_SIZE_MAX).then_some(n)
}

/// Parse `"4096"`, `"64K"`, `"1M"` into a byte count.
pub fn parse_size(s: &str) -> Option<usize> {
    let s = s.trim();
    let (digits, shift) = match s.as_bytes().last()? {
        b'K' | b'k' => (&s[..s.len() - 1], 10),
        b'M' | b'm' => (&s[..s.len() - 1], 20),
        _ => (s, 0),
    };
    let n: usize = digits.parse().ok()?;
    n.checked_mul(1 << shift)
}
