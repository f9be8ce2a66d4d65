//! Error codes shared by the compressor, the segment cursor and the decoder.
//!
//! The variants carry the conventional LZO integer codes so callers that sit
//! on a C-style boundary (a block driver, an FFI shim) can translate a
//! [`LzoError`] back and forth with [`LzoError::code`] / [`LzoError::from_code`].
//! Success (`LZO_E_OK`, 0) is `Result::Ok` and has no variant.

use core::fmt;

/// Errors returned by every fallible operation in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LzoError {
    /// Unspecified failure, e.g. a corrupt length counter in the decoder.
    Generic,
    /// Allocation failed.  Never produced by the codec itself.
    OutOfMemory,
    /// Input could not be compressed.  Reserved for callers.
    NotCompressible,
    /// A read needed more bytes than the logical input window holds.
    InputOverrun,
    /// A write needed more room than the logical output window holds.
    OutputOverrun,
    /// A back-reference points before the start of the decoded output.
    LookbehindOverrun,
    /// The compressed stream ended without an end-of-stream marker.
    EofNotFound,
    /// The end-of-stream marker was found before the input was exhausted.
    InputNotConsumed,
    /// The request needs a path that is not supported (unknown bitstream version).
    NotYetImplemented,
    /// Malformed request, e.g. backward addressing outside the written range.
    InvalidArgument,
}

impl LzoError {
    /// Every variant, in code order (-1 down to -10).
    pub const ALL: [LzoError; 10] = [
        LzoError::Generic,
        LzoError::OutOfMemory,
        LzoError::NotCompressible,
        LzoError::InputOverrun,
        LzoError::OutputOverrun,
        LzoError::LookbehindOverrun,
        LzoError::EofNotFound,
        LzoError::InputNotConsumed,
        LzoError::NotYetImplemented,
        LzoError::InvalidArgument,
    ];

    /// Negative integer code matching `LZO_E_*`.
    pub const fn code(self) -> i32 {
        match self {
            LzoError::Generic => -1,
            LzoError::OutOfMemory => -2,
            LzoError::NotCompressible => -3,
            LzoError::InputOverrun => -4,
            LzoError::OutputOverrun => -5,
            LzoError::LookbehindOverrun => -6,
            LzoError::EofNotFound => -7,
            LzoError::InputNotConsumed => -8,
            LzoError::NotYetImplemented => -9,
            LzoError::InvalidArgument => -10,
        }
    }

    /// Inverse of [`code`](Self::code).  Returns `None` for 0 (success) and
    /// for codes outside the known range.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.code() == code)
    }

    /// Short human-readable name.
    pub const fn error_name(self) -> &'static str {
        match self {
            LzoError::Generic => "generic error",
            LzoError::OutOfMemory => "out of memory",
            LzoError::NotCompressible => "data not compressible",
            LzoError::InputOverrun => "input overrun",
            LzoError::OutputOverrun => "output overrun",
            LzoError::LookbehindOverrun => "lookbehind overrun",
            LzoError::EofNotFound => "end-of-stream marker not found",
            LzoError::InputNotConsumed => "input not consumed",
            LzoError::NotYetImplemented => "not yet implemented",
            LzoError::InvalidArgument => "invalid argument",
        }
    }
}

impl fmt::Display for LzoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_name())
    }
}

impl std::error::Error for LzoError {}
