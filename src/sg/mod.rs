//! Scatter-gather buffers.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Segments`] / [`SegmentsMut`] | read / write access to a list of memory segments |
//! | [`ByteWindow`] | bounded cursor over a segment list (forward, snapshot, backward addressing) |
//! | [`Cursor`] | copyable iterator state used for snapshots |

pub mod segments;
pub mod window;

pub use segments::{alloc_segments, linearize, split_segments, Segments, SegmentsMut};
pub use window::{ByteWindow, Cursor, MAX_LOOKBACK};
