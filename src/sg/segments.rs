//! Segment-list abstraction.
//!
//! A segment list is an ordered sequence of byte slices that together form
//! one logical byte stream.  Anything that looks like a list of byte buffers
//! works: `&[&[u8]]`, `Vec<Vec<u8>>`, `[&mut [u8]; N]`, `&mut [Box<[u8]>]`, …
//! Segments may have any length, including zero.

/// Read access to an ordered list of memory segments.
pub trait Segments {
    /// Number of segments in the list.
    fn segment_count(&self) -> usize;

    /// Borrow segment `index`.  Panics if `index >= segment_count()`.
    fn segment(&self, index: usize) -> &[u8];

    /// Sum of all segment lengths.
    fn total_len(&self) -> usize {
        (0..self.segment_count()).map(|i| self.segment(i).len()).sum()
    }
}

/// Write access to an ordered list of memory segments.
pub trait SegmentsMut: Segments {
    /// Mutably borrow segment `index`.  Panics if `index >= segment_count()`.
    fn segment_mut(&mut self, index: usize) -> &mut [u8];
}

impl<B: AsRef<[u8]>> Segments for [B] {
    #[inline]
    fn segment_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn segment(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> SegmentsMut for [B] {
    #[inline]
    fn segment_mut(&mut self, index: usize) -> &mut [u8] {
        self[index].as_mut()
    }
}

impl<B: AsRef<[u8]>, const N: usize> Segments for [B; N] {
    #[inline]
    fn segment_count(&self) -> usize {
        N
    }

    #[inline]
    fn segment(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>, const N: usize> SegmentsMut for [B; N] {
    #[inline]
    fn segment_mut(&mut self, index: usize) -> &mut [u8] {
        self[index].as_mut()
    }
}

impl<B: AsRef<[u8]>> Segments for Vec<B> {
    #[inline]
    fn segment_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn segment(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> SegmentsMut for Vec<B> {
    #[inline]
    fn segment_mut(&mut self, index: usize) -> &mut [u8] {
        self[index].as_mut()
    }
}

impl<T: Segments + ?Sized> Segments for &T {
    #[inline]
    fn segment_count(&self) -> usize {
        (**self).segment_count()
    }

    #[inline]
    fn segment(&self, index: usize) -> &[u8] {
        (**self).segment(index)
    }
}

impl<T: Segments + ?Sized> Segments for &mut T {
    #[inline]
    fn segment_count(&self) -> usize {
        (**self).segment_count()
    }

    #[inline]
    fn segment(&self, index: usize) -> &[u8] {
        (**self).segment(index)
    }
}

impl<T: SegmentsMut + ?Sized> SegmentsMut for &mut T {
    #[inline]
    fn segment_mut(&mut self, index: usize) -> &mut [u8] {
        (**self).segment_mut(index)
    }
}

/// Split `data` into consecutive segments of at most `size` bytes.
///
/// `size == 0` yields a single segment holding all of `data`.
pub fn split_segments(data: &[u8], size: usize) -> Vec<&[u8]> {
    if size == 0 || data.is_empty() {
        return vec![data];
    }
    data.chunks(size).collect()
}

/// Allocate zeroed segments of `size` bytes (the last one shorter) covering
/// `capacity` bytes in total.
pub fn alloc_segments(capacity: usize, size: usize) -> Vec<Vec<u8>> {
    if size == 0 {
        return vec![vec![0u8; capacity]];
    }
    let mut segs = Vec::with_capacity(capacity / size + 1);
    let mut left = capacity;
    while left > 0 {
        let n = left.min(size);
        segs.push(vec![0u8; n]);
        left -= n;
    }
    segs
}

/// Concatenate the first `len` bytes of a segment list into one buffer.
pub fn linearize<S: Segments + ?Sized>(segments: &S, len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    for i in 0..segments.segment_count() {
        let left = len - out.len();
        if left == 0 {
            break;
        }
        let seg = segments.segment(i);
        out.extend_from_slice(&seg[..seg.len().min(left)]);
    }
    out
}
