// lzom — LZO1X-1 compression over scatter-gather segment lists

pub mod error;
pub mod sg;
pub mod block;
pub mod config;
pub mod io;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const LZOM_VERSION_MAJOR: u32 = 0;
pub const LZOM_VERSION_MINOR: u32 = 1;
pub const LZOM_VERSION_RELEASE: u32 = 0;
pub const LZOM_VERSION_NUMBER: u32 =
    LZOM_VERSION_MAJOR * 100 * 100 + LZOM_VERSION_MINOR * 100 + LZOM_VERSION_RELEASE;
pub const LZOM_VERSION_STRING: &str = "0.1.0";

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    LZOM_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    LZOM_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::{
    compress, compress_to_vec, compress_versioned, compress_window, decompress_safe,
    decompress_segments, decompress_to_vec, worst_compress, BitstreamVersion, Dictionary,
    LZO1X_1_MEM_COMPRESS,
};
pub use error::LzoError;
pub use sg::{ByteWindow, Cursor, Segments, SegmentsMut};
