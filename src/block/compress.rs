//! LZO1X-1 compression over scatter-gather buffers.
//!
//! | Function | Role |
//! |----------|------|
//! | [`compress`] | classic stream from segment lists |
//! | [`compress_versioned`] | same, choosing the [`BitstreamVersion`] |
//! | [`compress_window`] | stream driver over caller-positioned [`ByteWindow`]s |
//! | [`compress_to_vec`] | contiguous convenience wrapper |
//!
//! The stream driver cuts the input into blocks no longer than the largest
//! M4 distance plus one, zeroes the [`Dictionary`] for each block and runs the
//! block matcher on it.  Unmatched bytes at the end of a block (at least the
//! 20-byte safety margin) stay pending and are emitted by whichever
//! instruction comes next, possibly in a later block.  After the last block
//! the pending run is flushed and the end-of-stream marker written.
//!
//! All reads go through the input window, so the result is byte-identical
//! however the input and output are segmented.

use super::encode::{
    emit_eof, emit_header, emit_literals, emit_match, emit_zero_run, MATCH_BACKPATCH,
    ZERO_RUN_BACKPATCH,
};
use super::types::{
    hash4, worst_compress, BitstreamVersion, Dictionary, M3_MAX_OFFSET, MAX_ZERO_RUN_LENGTH,
    SAFETY_MARGIN,
};
use crate::error::LzoError;
use crate::sg::{ByteWindow, Cursor, Segments, SegmentsMut};

/// Encoder state that outlives a single block.
#[derive(Debug)]
struct EncoderState {
    /// Literal bytes owed from before the current block start.
    pending: usize,
    /// Input position where the pending literal run begins.
    anchor: Cursor,
    /// Where a trailing 1–3 literal count can be folded in, if anywhere.
    backpatch: Option<usize>,
    version: BitstreamVersion,
}

// ─────────────────────────────────────────────────────────────────────────────
// Block matcher
// ─────────────────────────────────────────────────────────────────────────────

/// Length of the match at block offsets `ip` / `candidate`, known to agree on
/// their first four bytes.  Checks the safety-margin limit every 8 bytes.
fn match_length<S: Segments>(
    input: &ByteWindow<S>,
    block_start: Cursor,
    here: Cursor,
    candidate: usize,
    ip: usize,
    ip_end: usize,
) -> Result<usize, LzoError> {
    let differs = |k: usize| -> Result<bool, LzoError> {
        Ok(input.read_u8_at(here, k)? != input.read_u8_at(block_start, candidate + k)?)
    };

    let mut m_len = 4;
    if differs(m_len)? {
        return Ok(m_len);
    }
    'extend: loop {
        m_len += 1;
        for _ in 0..7 {
            if differs(m_len)? {
                break 'extend;
            }
            m_len += 1;
        }
        if ip + m_len >= ip_end || differs(m_len)? {
            break;
        }
    }
    Ok(m_len)
}

/// Number of zero bytes starting at `here` (block offset `ip`), scanning no
/// further than `ip_end` and capped at the longest encodable run.
fn zero_run_length<S: Segments>(
    input: &ByteWindow<S>,
    here: Cursor,
    ip: usize,
    ip_end: usize,
) -> Result<usize, LzoError> {
    let limit = ip_end.min(ip + MAX_ZERO_RUN_LENGTH + 1);
    let mut ir = ip + 4;
    let mut buf = [0u8; 64];
    while ir < limit {
        let n = (limit - ir).min(buf.len());
        input.read_at(here, ir - ip, &mut buf[..n])?;
        match buf[..n].iter().position(|&b| b != 0) {
            Some(k) => {
                ir += k;
                break;
            }
            None => ir += n,
        }
    }
    Ok((ir - ip).min(MAX_ZERO_RUN_LENGTH))
}

/// Compress the `len`-byte block the input window is positioned at.
///
/// On return the input window sits at the end of the block and
/// `state.pending` holds the literal debt for whatever follows.
fn compress_block<S: Segments, T: SegmentsMut>(
    input: &mut ByteWindow<S>,
    len: usize,
    out: &mut ByteWindow<T>,
    dict: &mut Dictionary,
    state: &mut EncoderState,
) -> Result<(), LzoError> {
    debug_assert!(len > SAFETY_MARGIN && len <= state.version.m4_max_offset() + 1);

    let block_start = input.snapshot();
    let ip_end = len - SAFETY_MARGIN;
    // Block offsets: scan position, end of the last instruction, and where
    // the input cursor currently rests.
    let mut ip = 0usize;
    let mut ii = 0usize;
    let mut synced = 0usize;

    if state.pending < 4 {
        ip += 4 - state.pending;
    }

    'literal: loop {
        ip += 1 + ((ip - ii) >> 5);
        loop {
            if ip >= ip_end {
                break 'literal;
            }
            input.skip_forward(ip - synced)?;
            synced = ip;
            let here = input.snapshot();
            let dv = input.read_u32_at(here, 0)?;

            let mut run = 0;
            let mut candidate = 0;
            if dv == 0 && state.version.is_versioned() {
                run = zero_run_length(input, here, ip, ip_end)?;
            } else {
                // Always overwrite, even when the candidate turns out stale.
                candidate = dict.swap(hash4(dv), ip as u16) as usize;
                if input.read_u32_at(block_start, candidate)? != dv {
                    continue 'literal;
                }
            }

            let t = ip - ii + state.pending;
            state.pending = 0;
            emit_literals(input, state.anchor, t, out, &mut state.backpatch, false)?;

            if run > 0 {
                emit_zero_run(out, run)?;
                state.backpatch = Some(ZERO_RUN_BACKPATCH);
                ip += run;
            } else {
                let mut m_len = match_length(input, block_start, here, candidate, ip, ip_end)?;
                let m_off = ip - candidate;
                // A long M4 copy whose offset bytes could read as a zero-run
                // header is ambiguous to versioned decoders.
                if state.version.is_versioned()
                    && m_off > M3_MAX_OFFSET
                    && (261..=264).contains(&m_len)
                    && ((m_off - 0x4000) & 0x403f) == 0x403f
                {
                    m_len = 260;
                }
                emit_match(out, m_off, m_len)?;
                state.backpatch = Some(MATCH_BACKPATCH);
                ip += m_len;
            }

            ii = ip;
            input.skip_forward(ip - synced)?;
            synced = ip;
            state.anchor = input.snapshot();
        }
    }

    state.pending += len - ii;
    input.skip_forward(len - synced)?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Stream driver
// ─────────────────────────────────────────────────────────────────────────────

/// Compress everything left in `src` into `dst` as one LZO1X stream.
///
/// Returns the number of bytes written to `dst`.  Empty input writes nothing.
/// On error the content of `dst` is unspecified and must be discarded.
pub fn compress_window<S: Segments, T: SegmentsMut>(
    src: &mut ByteWindow<S>,
    dst: &mut ByteWindow<T>,
    dict: &mut Dictionary,
    version: BitstreamVersion,
) -> Result<usize, LzoError> {
    let in_len = src.remaining();
    let out_start = dst.position();
    if in_len == 0 {
        return Ok(0);
    }

    emit_header(dst, version)?;
    let data_start = dst.position();

    let mut state = EncoderState {
        pending: 0,
        anchor: src.snapshot(),
        backpatch: None,
        version,
    };
    let block_max = version.m4_max_offset() + 1;
    let mut l = in_len;

    while l > SAFETY_MARGIN {
        let ll = l.min(block_max);
        let ll_end = (in_len - l) + ll;
        // Bail out to the literal tail if the skip heuristic could overflow
        // index arithmetic (or has nothing to scan).
        match ll_end.checked_add((state.pending + ll) >> 5) {
            Some(end) if end > ll_end => {}
            _ => break,
        }

        dict.reset();
        compress_block(src, ll, dst, dict, &mut state)?;
        l -= ll;
    }

    let t = state.pending + l;
    let opening = dst.position() == data_start;
    emit_literals(src, state.anchor, t, dst, &mut state.backpatch, opening)?;
    emit_eof(dst)?;
    src.skip_forward(l)?;

    Ok(dst.position() - out_start)
}

/// Compress the segment list `src` into the segment list `dst` using the
/// classic bitstream.  Returns the compressed length.
///
/// `dst` should hold at least [`worst_compress`]`(src_len)` bytes; a smaller
/// destination is fine as long as the data fits, otherwise the call fails
/// with [`LzoError::OutputOverrun`].
pub fn compress<S: Segments, T: SegmentsMut>(
    src: S,
    dst: T,
    dict: &mut Dictionary,
) -> Result<usize, LzoError> {
    compress_versioned(src, dst, dict, BitstreamVersion::V0)
}

/// Like [`compress`] with an explicit bitstream version.
pub fn compress_versioned<S: Segments, T: SegmentsMut>(
    src: S,
    dst: T,
    dict: &mut Dictionary,
    version: BitstreamVersion,
) -> Result<usize, LzoError> {
    let mut src = ByteWindow::new(src);
    let mut dst = ByteWindow::new(dst);
    compress_window(&mut src, &mut dst, dict, version)
}

/// Compress a contiguous buffer into a freshly allocated `Vec`.
pub fn compress_to_vec(data: &[u8], version: BitstreamVersion) -> Result<Vec<u8>, LzoError> {
    let mut out = vec![0u8; worst_compress(data.len())];
    let mut dict = Dictionary::new();
    let n = compress_versioned([data], [out.as_mut_slice()], &mut dict, version)?;
    out.truncate(n);
    Ok(out)
}
