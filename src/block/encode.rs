//! LZO1X instruction writers.
//!
//! Each writer computes the full size of the instruction it is about to
//! produce and checks it against the output window first, so a failing call
//! returns [`LzoError::OutputOverrun`] with nothing written.
//!
//! | Writer | Bytes |
//! |--------|-------|
//! | [`emit_literals`] | opcode (or backpatch) + optional length tail + `t` raw bytes |
//! | [`emit_match`] | M2 / M3 / M4 instruction, 2..=n bytes |
//! | [`emit_zero_run`] | 4-byte RLE instruction (versioned bitstream) |
//! | [`emit_header`] | `{17, version}` |
//! | [`emit_eof`] | `{17, 0, 0}` |

use super::types::{
    BitstreamVersion, EOF_MARKER, FIRST_LITERAL_MAX, M2_MAX_LEN, M2_MAX_OFFSET, M3_MARKER,
    M3_MAX_LEN, M3_MAX_OFFSET, M4_MARKER, M4_MAX_LEN, MIN_ZERO_RUN_LENGTH, VERSION_HEADER_MARKER,
};
use crate::error::LzoError;
use crate::sg::{ByteWindow, Cursor, Segments, SegmentsMut};

/// Backpatch offset after a match instruction: the low two bits of the byte
/// two positions back are free for a trailing literal count.
pub const MATCH_BACKPATCH: usize = 2;
/// Backpatch offset after a zero-run instruction.
pub const ZERO_RUN_BACKPATCH: usize = 3;

#[inline]
fn ensure<T: SegmentsMut>(out: &ByteWindow<T>, n: usize) -> Result<(), LzoError> {
    if n > out.remaining() {
        Err(LzoError::OutputOverrun)
    } else {
        Ok(())
    }
}

/// Bytes needed to encode an overflow length `x >= 1`: one zero byte per
/// full 255 above the first, then the remainder.
#[inline]
pub fn length_tail_len(x: usize) -> usize {
    (x - 1) / 255 + 1
}

fn write_length_tail<T: SegmentsMut>(out: &mut ByteWindow<T>, x: usize) -> Result<(), LzoError> {
    let zeros = (x - 1) / 255;
    out.fill_forward(0, zeros)?;
    out.write_u8((x - zeros * 255) as u8)
}

/// Encode a literal run of `t` bytes taken from `input` at `from`.
///
/// * `t == 0` writes nothing.
/// * `opening` selects the `17 + t` form used when the run is the first
///   instruction of the stream (`t <= 238`).
/// * `1..=3` folds `t` into the previous instruction through `backpatch`,
///   which is consumed.  Without a slot the opening form is used.
/// * `4..=18` is one opcode byte `t - 3`; longer runs use a zero opcode
///   followed by a length tail for `t - 18`.
pub fn emit_literals<S: Segments, T: SegmentsMut>(
    input: &ByteWindow<S>,
    from: Cursor,
    t: usize,
    out: &mut ByteWindow<T>,
    backpatch: &mut Option<usize>,
    opening: bool,
) -> Result<(), LzoError> {
    if t == 0 {
        return Ok(());
    }
    if opening && t <= FIRST_LITERAL_MAX {
        ensure(out, 1 + t)?;
        out.write_u8((17 + t) as u8)?;
    } else if t <= 3 {
        match *backpatch {
            Some(offset) => {
                ensure(out, t)?;
                let prev = out.read_back(offset)?;
                out.write_back(offset, prev | t as u8)?;
                *backpatch = None;
            }
            None => {
                ensure(out, 1 + t)?;
                out.write_u8((17 + t) as u8)?;
            }
        }
    } else if t <= 18 {
        ensure(out, 1 + t)?;
        out.write_u8((t - 3) as u8)?;
    } else {
        let tt = t - 18;
        ensure(out, 1 + length_tail_len(tt) + t)?;
        out.write_u8(0)?;
        write_length_tail(out, tt)?;
    }
    input.copy_to(from, t, out)
}

/// Size of the instruction [`emit_match`] would write.
pub fn match_len(m_off: usize, m_len: usize) -> usize {
    if m_len <= M2_MAX_LEN && m_off <= M2_MAX_OFFSET {
        2
    } else if m_off <= M3_MAX_OFFSET {
        if m_len <= M3_MAX_LEN {
            3
        } else {
            1 + length_tail_len(m_len - M3_MAX_LEN) + 2
        }
    } else if m_len <= M4_MAX_LEN {
        3
    } else {
        1 + length_tail_len(m_len - M4_MAX_LEN) + 2
    }
}

/// Encode a back-reference of `m_len` bytes at distance `m_off`.
///
/// The caller picks `m_len` (including the versioned 260-byte truncation);
/// this only lays out the bits.
pub fn emit_match<T: SegmentsMut>(
    out: &mut ByteWindow<T>,
    m_off: usize,
    m_len: usize,
) -> Result<(), LzoError> {
    debug_assert!(m_off >= 1 && m_len >= 3);
    ensure(out, match_len(m_off, m_len))?;

    if m_len <= M2_MAX_LEN && m_off <= M2_MAX_OFFSET {
        let off = m_off - 1;
        out.write_u8((((m_len - 1) << 5) | ((off & 7) << 2)) as u8)?;
        return out.write_u8((off >> 3) as u8);
    }

    let (off, marker, max_len) = if m_off <= M3_MAX_OFFSET {
        (m_off - 1, M3_MARKER, M3_MAX_LEN)
    } else {
        let off = m_off - 0x4000;
        (off, M4_MARKER | ((off >> 11) & 8) as u8, M4_MAX_LEN)
    };
    if m_len <= max_len {
        out.write_u8(marker | (m_len - 2) as u8)?;
    } else {
        out.write_u8(marker)?;
        write_length_tail(out, m_len - max_len)?;
    }
    out.write_u8((off << 2) as u8)?;
    out.write_u8((off >> 6) as u8)
}

/// Encode a run of `run` zero bytes (`4..=2051`) for the versioned bitstream.
pub fn emit_zero_run<T: SegmentsMut>(out: &mut ByteWindow<T>, run: usize) -> Result<(), LzoError> {
    debug_assert!(run >= MIN_ZERO_RUN_LENGTH);
    let r = (run - MIN_ZERO_RUN_LENGTH) as u32;
    let word = (r << 21) | 0x00ff_fc18 | (r & 7);
    out.write_forward(&word.to_le_bytes())
}

/// Two-byte header announcing a versioned stream.  Classic streams have none.
pub fn emit_header<T: SegmentsMut>(
    out: &mut ByteWindow<T>,
    version: BitstreamVersion,
) -> Result<(), LzoError> {
    if version.is_versioned() {
        out.write_forward(&[VERSION_HEADER_MARKER, version.number()])?;
    }
    Ok(())
}

pub fn emit_eof<T: SegmentsMut>(out: &mut ByteWindow<T>) -> Result<(), LzoError> {
    out.write_forward(&EOF_MARKER)
}
