//! LZO1X block engine.
//!
//! Compression runs directly on scatter-gather [`ByteWindow`](crate::sg::ByteWindow)s;
//! decompression works on contiguous buffers.

pub mod compress;
pub mod decompress;
pub mod encode;
pub mod types;

pub use compress::{compress, compress_to_vec, compress_versioned, compress_window};
pub use decompress::{decompress_safe, decompress_segments, decompress_to_vec};
pub use types::{worst_compress, BitstreamVersion, Dictionary, LZO1X_1_MEM_COMPRESS};
