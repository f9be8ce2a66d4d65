//! LZO1X format constants, the match-finder hash, and the dictionary scratch.
//!
//! The distance and length classes below are those of the public LZO1X
//! format; a decoder relies on them bit for bit.

// ─────────────────────────────────────────────────────────────────────────────
// Instruction classes
// ─────────────────────────────────────────────────────────────────────────────

/// Largest distance of the 2-byte M2 form.
pub const M2_MAX_OFFSET: usize = 0x0800;
/// Largest distance of the M3 form.
pub const M3_MAX_OFFSET: usize = 0x4000;
/// Largest M4 distance in the classic (v0) bitstream.
pub const M4_MAX_OFFSET_V0: usize = 0xbfff;
/// Largest M4 distance in the versioned bitstream.  One less than v0 so that
/// a short M4 can never look like a zero-run instruction.
pub const M4_MAX_OFFSET_V1: usize = 0xbffe;

pub const M2_MAX_LEN: usize = 8;
pub const M3_MAX_LEN: usize = 33;
pub const M4_MAX_LEN: usize = 9;

pub const M2_MARKER: u8 = 64;
pub const M3_MARKER: u8 = 32;
pub const M4_MARKER: u8 = 16;

/// Shortest zero run encoded as an RLE instruction.
pub const MIN_ZERO_RUN_LENGTH: usize = 4;
/// Longest zero run one RLE instruction can carry (11-bit field + minimum).
pub const MAX_ZERO_RUN_LENGTH: usize = 2047 + MIN_ZERO_RUN_LENGTH;

/// First byte of a versioned stream.  A classic stream never starts with it.
pub const VERSION_HEADER_MARKER: u8 = 17;

/// End-of-stream marker: an M4 instruction with distance zero.
pub const EOF_MARKER: [u8; 3] = [M4_MARKER | 1, 0, 0];

/// Literal runs up to this length can use the `17 + t` opening form.
pub const FIRST_LITERAL_MAX: usize = 238;

/// Trailing bytes of each block that are never searched for matches.
pub const SAFETY_MARGIN: usize = 20;

/// Maximum number of consecutive zero bytes accepted in a length counter
/// before the decoder gives up (prevents `usize` overflow).
pub const MAX_255_COUNT: usize = usize::MAX / 255 - 2;

// ─────────────────────────────────────────────────────────────────────────────
// Dictionary
// ─────────────────────────────────────────────────────────────────────────────

/// log2 of the dictionary bucket count.
pub const D_BITS: u32 = 13;
/// Number of dictionary buckets.
pub const D_SIZE: usize = 1 << D_BITS;
pub const D_MASK: usize = D_SIZE - 1;

/// Bytes of scratch memory one compression needs.
pub const LZO1X_1_MEM_COMPRESS: usize = D_SIZE * core::mem::size_of::<u16>();

/// Multiplicative hash of a 4-byte context.
#[inline]
pub fn hash4(dv: u32) -> usize {
    (dv.wrapping_mul(0x1824_429d) >> (32 - D_BITS)) as usize & D_MASK
}

/// Match-finder scratch: one block-relative position per hash bucket.
///
/// Single slot, no chaining, always overwritten.  One `Dictionary` must not
/// serve two compressions at once; `&mut` access enforces that.
#[derive(Clone)]
pub struct Dictionary {
    slots: Box<[u16]>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary { slots: vec![0u16; D_SIZE].into_boxed_slice() }
    }

    /// Zero every bucket.  Done at the start of each block.
    #[inline]
    pub fn reset(&mut self) {
        self.slots.fill(0);
    }

    /// Store `position` in bucket `h` and return what was there before.
    #[inline]
    pub fn swap(&mut self, h: usize, position: u16) -> u16 {
        core::mem::replace(&mut self.slots[h], position)
    }

    #[inline]
    pub fn get(&self, h: usize) -> u16 {
        self.slots[h]
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let used = self.slots.iter().filter(|&&s| s != 0).count();
        f.debug_struct("Dictionary").field("buckets", &D_SIZE).field("used", &used).finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bitstream version
// ─────────────────────────────────────────────────────────────────────────────

/// Which flavour of the LZO1X bitstream to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitstreamVersion {
    /// Classic LZO1X-1: no header, M4 distances up to `0xbfff`.
    #[default]
    V0,
    /// Versioned stream (`lzo-rle`): `{17, 1}` header, zero-run instructions,
    /// M4 distances up to `0xbffe`.
    V1,
}

impl BitstreamVersion {
    /// Value stored in the second header byte.
    pub const fn number(self) -> u8 {
        match self {
            BitstreamVersion::V0 => 0,
            BitstreamVersion::V1 => 1,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            0 => Some(BitstreamVersion::V0),
            1 => Some(BitstreamVersion::V1),
            _ => None,
        }
    }

    /// Largest M4 distance, which also bounds the block length (`max + 1`).
    pub const fn m4_max_offset(self) -> usize {
        match self {
            BitstreamVersion::V0 => M4_MAX_OFFSET_V0,
            BitstreamVersion::V1 => M4_MAX_OFFSET_V1,
        }
    }

    #[inline]
    pub const fn is_versioned(self) -> bool {
        !matches!(self, BitstreamVersion::V0)
    }
}

/// Worst-case compressed size for `n` input bytes: `n + n/16 + 64 + 3 + 2`.
#[inline]
pub const fn worst_compress(n: usize) -> usize {
    n + n / 16 + 64 + 3 + 2
}
