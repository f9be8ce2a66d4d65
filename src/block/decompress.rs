//! Safe LZO1X decompression into a contiguous buffer.
//!
//! Scatter-gather input is linearized first ([`decompress_segments`]); the
//! decoder itself walks one `&[u8]` and never reads or writes outside the
//! slices it is given.  Malformed input returns an [`LzoError`], never
//! panics.
//!
//! Understands both the classic stream and the versioned one (`{17, v}`
//! header, zero-run instructions).

use super::types::{
    BitstreamVersion, M2_MARKER, M2_MAX_OFFSET, M3_MARKER, M4_MARKER, MAX_255_COUNT,
    MIN_ZERO_RUN_LENGTH, VERSION_HEADER_MARKER,
};
use crate::error::LzoError;
use crate::sg::{linearize, Segments};

#[inline(always)]
fn need_ip(src: &[u8], ip: usize, n: usize) -> Result<(), LzoError> {
    if src.len() - ip < n {
        Err(LzoError::InputOverrun)
    } else {
        Ok(())
    }
}

#[inline(always)]
fn need_op(dst: &[u8], op: usize, n: usize) -> Result<(), LzoError> {
    if dst.len() - op < n {
        Err(LzoError::OutputOverrun)
    } else {
        Ok(())
    }
}

#[inline(always)]
fn le16(src: &[u8], ip: usize) -> usize {
    u16::from_le_bytes([src[ip], src[ip + 1]]) as usize
}

/// Read an overflow length: zero bytes worth 255 each, then a non-zero
/// terminator.  Returns `base + 255 * zeros + terminator`.
fn read_length(src: &[u8], ip: &mut usize, base: usize) -> Result<usize, LzoError> {
    let start = *ip;
    loop {
        need_ip(src, *ip, 1)?;
        if src[*ip] != 0 {
            break;
        }
        *ip += 1;
    }
    let zeros = *ip - start;
    if zeros > MAX_255_COUNT {
        return Err(LzoError::Generic);
    }
    let last = src[*ip] as usize;
    *ip += 1;
    Ok(base + zeros * 255 + last)
}

fn copy_literals(
    src: &[u8],
    ip: &mut usize,
    dst: &mut [u8],
    op: &mut usize,
    t: usize,
) -> Result<(), LzoError> {
    need_ip(src, *ip, t)?;
    need_op(dst, *op, t)?;
    dst[*op..*op + t].copy_from_slice(&src[*ip..*ip + t]);
    *ip += t;
    *op += t;
    Ok(())
}

// Byte-wise forward copy: source and destination may overlap when the
// distance is shorter than the length (run replication).
fn copy_match(dst: &mut [u8], op: &mut usize, dist: usize, len: usize) -> Result<(), LzoError> {
    if dist > *op {
        return Err(LzoError::LookbehindOverrun);
    }
    need_op(dst, *op, len)?;
    let from = *op - dist;
    if dist >= len {
        dst.copy_within(from..from + len, *op);
    } else {
        for k in 0..len {
            dst[*op + k] = dst[from + k];
        }
    }
    *op += len;
    Ok(())
}

/// Decompress one LZO1X stream from `src` into `dst`.
///
/// Returns the number of bytes written.  Empty input decodes to nothing.
pub fn decompress_safe(src: &[u8], dst: &mut [u8]) -> Result<usize, LzoError> {
    if src.is_empty() {
        return Ok(0);
    }
    if src.len() < 3 {
        return Err(LzoError::InputOverrun);
    }

    let mut ip = 0usize;
    let mut op = 0usize;
    let mut version = BitstreamVersion::V0;

    if src.len() >= 5 && src[0] == VERSION_HEADER_MARKER {
        version = BitstreamVersion::from_number(src[1]).ok_or(LzoError::NotYetImplemented)?;
        ip = 2;
    }

    // 0: after a match with no trailing literals, 1..=3: after that many
    // trailing literals, 4: after a full literal run.
    let mut state = 0usize;

    if src[ip] > 17 {
        let t = (src[ip] - 17) as usize;
        ip += 1;
        copy_literals(src, &mut ip, dst, &mut op, t)?;
        state = if t < 4 { t } else { 4 };
    }

    loop {
        if ip >= src.len() {
            return Err(LzoError::EofNotFound);
        }
        let t = src[ip] as usize;
        ip += 1;

        let (dist, len, next) = if t < M4_MARKER as usize {
            if state == 0 {
                let run = if t == 0 { read_length(src, &mut ip, 15)? + 3 } else { t + 3 };
                copy_literals(src, &mut ip, dst, &mut op, run)?;
                state = 4;
                continue;
            }
            need_ip(src, ip, 1)?;
            let low = (t >> 2) + ((src[ip] as usize) << 2);
            ip += 1;
            if state != 4 {
                // M1: two bytes within 1 KiB.
                (1 + low, 2, t & 3)
            } else {
                // Three bytes just past the M2 range, right after literals.
                (1 + M2_MAX_OFFSET + low, 3, t & 3)
            }
        } else if t >= M2_MARKER as usize {
            need_ip(src, ip, 1)?;
            let dist = 1 + ((t >> 2) & 7) + ((src[ip] as usize) << 3);
            ip += 1;
            (dist, (t >> 5) + 1, t & 3)
        } else if t >= M3_MARKER as usize {
            let mut len = (t & 31) + 2;
            if len == 2 {
                len = read_length(src, &mut ip, 31)? + 2;
            }
            need_ip(src, ip, 2)?;
            let v = le16(src, ip);
            ip += 2;
            (1 + (v >> 2), len, v & 3)
        } else {
            need_ip(src, ip, 2)?;
            let v = le16(src, ip);
            if version.is_versioned() && (t & 0xf8) == 0x18 && (v & 0xfffc) == 0xfffc {
                need_ip(src, ip, 3)?;
                let run = ((t & 7) | ((src[ip + 2] as usize) << 3)) + MIN_ZERO_RUN_LENGTH;
                need_op(dst, op, run)?;
                dst[op..op + run].fill(0);
                op += run;
                ip += 3;
                let next = v & 3;
                copy_literals(src, &mut ip, dst, &mut op, next)?;
                state = next;
                continue;
            }

            let high = (t & 8) << 11;
            let mut len = (t & 7) + 2;
            let mut v = v;
            if len == 2 {
                len = read_length(src, &mut ip, 7)? + 2;
                need_ip(src, ip, 2)?;
                v = le16(src, ip);
            }
            ip += 2;
            let dist = high + (v >> 2);
            if dist == 0 {
                if len != 3 {
                    return Err(LzoError::Generic);
                }
                return match ip.cmp(&src.len()) {
                    core::cmp::Ordering::Equal => Ok(op),
                    core::cmp::Ordering::Less => Err(LzoError::InputNotConsumed),
                    core::cmp::Ordering::Greater => Err(LzoError::InputOverrun),
                };
            }
            (dist + 0x4000, len, v & 3)
        };

        copy_match(dst, &mut op, dist, len)?;
        copy_literals(src, &mut ip, dst, &mut op, next)?;
        state = next;
    }
}

/// Decompress into a new `Vec` holding at most `capacity` bytes.
pub fn decompress_to_vec(src: &[u8], capacity: usize) -> Result<Vec<u8>, LzoError> {
    let mut out = vec![0u8; capacity];
    let n = decompress_safe(src, &mut out)?;
    out.truncate(n);
    Ok(out)
}

/// Decompress a stream held in a segment list by linearizing it first.
pub fn decompress_segments<S: Segments + ?Sized>(
    src: &S,
    src_len: usize,
    dst: &mut [u8],
) -> Result<usize, LzoError> {
    if src_len > src.total_len() {
        return Err(LzoError::InvalidArgument);
    }
    let flat = linearize(src, src_len);
    decompress_safe(&flat, dst)
}
