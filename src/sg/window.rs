//! `ByteWindow` — a cursor over a scatter-gather segment list.
//!
//! The window exposes a bounded logical byte range spread across any number
//! of segments.  Forward operations (`read_forward`, `write_forward`,
//! `skip_forward`, `fill_forward`) consume that range; `read_at` addresses it
//! relative to a saved [`Cursor`] without moving; `read_back` / `write_back`
//! address a few already-consumed bytes behind the current position.
//!
//! Every operation is checked against the remaining logical length before it
//! touches memory.  A failing call returns an error and leaves both the
//! cursor and the underlying segments untouched.
//!
//! The cursor may rest at the very end of a segment; the next forward
//! operation steps over it (and over any empty segments) lazily.

use super::segments::{Segments, SegmentsMut};
use crate::error::LzoError;

/// Largest supported offset for [`ByteWindow::read_back`] /
/// [`ByteWindow::write_back`].
pub const MAX_LOOKBACK: usize = 4;

/// Iterator state of a [`ByteWindow`]: where the next byte comes from and
/// how much of the logical window is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    offset: usize,
    remaining: usize,
    position: usize,
}

impl Cursor {
    /// Bytes left in the logical window from this point.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Bytes consumed since the start of the window.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Segment index the cursor currently points into.
    #[inline]
    pub fn segment_index(&self) -> usize {
        self.index
    }

    /// Offset inside the current segment.
    #[inline]
    pub fn segment_offset(&self) -> usize {
        self.offset
    }
}

/// Bounded logical byte window over a segment list.
#[derive(Debug)]
pub struct ByteWindow<S> {
    segments: S,
    cursor: Cursor,
}

impl<S: Segments> ByteWindow<S> {
    /// Window spanning every byte of `segments`.
    pub fn new(segments: S) -> Self {
        let total = segments.total_len();
        ByteWindow {
            segments,
            cursor: Cursor { index: 0, offset: 0, remaining: total, position: 0 },
        }
    }

    /// Window spanning the first `len` bytes of `segments`.
    ///
    /// Returns [`LzoError::InvalidArgument`] if the segments hold fewer than
    /// `len` bytes.
    pub fn with_len(segments: S, len: usize) -> Result<Self, LzoError> {
        if len > segments.total_len() {
            return Err(LzoError::InvalidArgument);
        }
        Ok(ByteWindow {
            segments,
            cursor: Cursor { index: 0, offset: 0, remaining: len, position: 0 },
        })
    }

    /// Bytes left in the logical window.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.cursor.remaining
    }

    /// Bytes consumed since the window was created.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.position
    }

    /// Copy of the current iterator state.
    #[inline]
    pub fn snapshot(&self) -> Cursor {
        self.cursor
    }

    /// Reinstate a state previously returned by [`snapshot`](Self::snapshot).
    #[inline]
    pub fn restore(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Borrow the underlying segment list.
    pub fn segments(&self) -> &S {
        &self.segments
    }

    /// Give the segment list back.
    pub fn into_inner(self) -> S {
        self.segments
    }

    /// Copy `buf.len()` bytes out of the window and advance past them.
    pub fn read_forward(&mut self, buf: &mut [u8]) -> Result<(), LzoError> {
        self.cursor = self.read_from(self.cursor, buf)?;
        Ok(())
    }

    /// Advance `n` bytes without copying.
    pub fn skip_forward(&mut self, n: usize) -> Result<(), LzoError> {
        if n > self.cursor.remaining {
            return Err(LzoError::InputOverrun);
        }
        self.cursor = self.walk(self.cursor, n);
        Ok(())
    }

    /// Read `buf.len()` bytes located `offset` bytes past `at`, leaving the
    /// window's own cursor where it is.
    pub fn read_at(&self, at: Cursor, offset: usize, buf: &mut [u8]) -> Result<(), LzoError> {
        match offset.checked_add(buf.len()) {
            Some(end) if end <= at.remaining => {}
            _ => return Err(LzoError::InputOverrun),
        }
        let start = self.walk(at, offset);
        self.read_from(start, buf)?;
        Ok(())
    }

    /// Single byte at `offset` past `at`.
    #[inline]
    pub fn read_u8_at(&self, at: Cursor, offset: usize) -> Result<u8, LzoError> {
        let mut b = [0u8; 1];
        self.read_at(at, offset, &mut b)?;
        Ok(b[0])
    }

    /// Little-endian `u32` at `offset` past `at`.
    #[inline]
    pub fn read_u32_at(&self, at: Cursor, offset: usize) -> Result<u32, LzoError> {
        let mut b = [0u8; 4];
        self.read_at(at, offset, &mut b)?;
        Ok(u32::from_le_bytes(b))
    }

    /// Read the byte `offset` positions behind the cursor (1 = last byte
    /// consumed).
    pub fn read_back(&self, offset: usize) -> Result<u8, LzoError> {
        let (index, pos) = self.locate_back(offset)?;
        Ok(self.segments.segment(index)[pos])
    }

    /// Copy `len` bytes starting at `from` (a snapshot of this window) into
    /// `dst`, advancing `dst` only.  Both sides are checked before any byte
    /// moves.
    pub fn copy_to<T: SegmentsMut>(
        &self,
        from: Cursor,
        len: usize,
        dst: &mut ByteWindow<T>,
    ) -> Result<(), LzoError> {
        if len > from.remaining {
            return Err(LzoError::InputOverrun);
        }
        if len > dst.cursor.remaining {
            return Err(LzoError::OutputOverrun);
        }
        let mut src = from;
        let mut out = dst.cursor;
        let mut left = len;
        while left > 0 {
            let seg = self.segments.segment(src.index);
            let src_avail = seg.len() - src.offset;
            if src_avail == 0 {
                src.index += 1;
                src.offset = 0;
                continue;
            }
            let dseg = dst.segments.segment_mut(out.index);
            let dst_avail = dseg.len() - out.offset;
            if dst_avail == 0 {
                out.index += 1;
                out.offset = 0;
                continue;
            }
            let n = left.min(src_avail).min(dst_avail);
            dseg[out.offset..out.offset + n].copy_from_slice(&seg[src.offset..src.offset + n]);
            src.offset += n;
            out.offset += n;
            left -= n;
        }
        out.remaining -= len;
        out.position += len;
        dst.cursor = out;
        Ok(())
    }

    // Move `n` bytes forward from `c`.  Caller guarantees `n <= c.remaining`.
    fn walk(&self, mut c: Cursor, n: usize) -> Cursor {
        debug_assert!(n <= c.remaining);
        c.remaining -= n;
        c.position += n;
        let mut left = n;
        while left > 0 {
            let avail = self.segments.segment(c.index).len() - c.offset;
            if left <= avail {
                c.offset += left;
                break;
            }
            left -= avail;
            c.index += 1;
            c.offset = 0;
        }
        c
    }

    fn read_from(&self, mut c: Cursor, buf: &mut [u8]) -> Result<Cursor, LzoError> {
        let len = buf.len();
        if len > c.remaining {
            return Err(LzoError::InputOverrun);
        }
        let mut done = 0;
        while done < len {
            let seg = self.segments.segment(c.index);
            let avail = seg.len() - c.offset;
            if avail == 0 {
                c.index += 1;
                c.offset = 0;
                continue;
            }
            let n = avail.min(len - done);
            buf[done..done + n].copy_from_slice(&seg[c.offset..c.offset + n]);
            c.offset += n;
            done += n;
        }
        c.remaining -= len;
        c.position += len;
        Ok(c)
    }

    // Resolve a backward offset to (segment, offset-in-segment), walking back
    // across segment boundaries.
    fn locate_back(&self, offset: usize) -> Result<(usize, usize), LzoError> {
        if offset == 0 || offset > MAX_LOOKBACK || offset > self.cursor.position {
            return Err(LzoError::InvalidArgument);
        }
        let mut index = self.cursor.index;
        let mut pos = self.cursor.offset;
        let mut back = offset;
        loop {
            if back <= pos {
                return Ok((index, pos - back));
            }
            back -= pos;
            if index == 0 {
                return Err(LzoError::InvalidArgument);
            }
            index -= 1;
            pos = self.segments.segment(index).len();
        }
    }
}

impl<S: SegmentsMut> ByteWindow<S> {
    /// Copy `data` into the window and advance past it.
    pub fn write_forward(&mut self, data: &[u8]) -> Result<(), LzoError> {
        let len = data.len();
        if len > self.cursor.remaining {
            return Err(LzoError::OutputOverrun);
        }
        let mut c = self.cursor;
        let mut done = 0;
        while done < len {
            let seg = self.segments.segment_mut(c.index);
            let avail = seg.len() - c.offset;
            if avail == 0 {
                c.index += 1;
                c.offset = 0;
                continue;
            }
            let n = avail.min(len - done);
            seg[c.offset..c.offset + n].copy_from_slice(&data[done..done + n]);
            c.offset += n;
            done += n;
        }
        c.remaining -= len;
        c.position += len;
        self.cursor = c;
        Ok(())
    }

    /// Write `n` copies of `byte`.
    pub fn fill_forward(&mut self, byte: u8, n: usize) -> Result<(), LzoError> {
        if n > self.cursor.remaining {
            return Err(LzoError::OutputOverrun);
        }
        let mut c = self.cursor;
        let mut left = n;
        while left > 0 {
            let seg = self.segments.segment_mut(c.index);
            let avail = seg.len() - c.offset;
            if avail == 0 {
                c.index += 1;
                c.offset = 0;
                continue;
            }
            let k = avail.min(left);
            seg[c.offset..c.offset + k].fill(byte);
            c.offset += k;
            left -= k;
        }
        c.remaining -= n;
        c.position += n;
        self.cursor = c;
        Ok(())
    }

    /// Write a single byte.
    #[inline]
    pub fn write_u8(&mut self, byte: u8) -> Result<(), LzoError> {
        self.write_forward(&[byte])
    }

    /// Overwrite the byte `offset` positions behind the cursor.
    pub fn write_back(&mut self, offset: usize, byte: u8) -> Result<(), LzoError> {
        let (index, pos) = self.locate_back(offset)?;
        self.segments.segment_mut(index)[pos] = byte;
        Ok(())
    }
}
